//! Client for WCPS-capable coverage servers.
//!
//! Renders [`wcps_query::Query`] values, posts them to an OWS endpoint and
//! decodes what comes back.
//!
//! # Example
//!
//! ```rust,no_run
//! use wcps_client::{templates, Connector, decode};
//! use wcps_query::AxisSubset;
//!
//! # async fn run() -> wcps_client::ClientResult<()> {
//! let connector = Connector::from_url("https://ows.rasdaman.org/rasdaman/ows")?;
//! let query = templates::minimum(
//!     "AvgLandTemp",
//!     vec![
//!         AxisSubset::range("ansi", "2003-09", "2009-02"),
//!         AxisSubset::point("Lat", 27.09),
//!         AxisSubset::point("Long", 64),
//!     ],
//! );
//! let payload = connector.execute_query(&query).await?;
//! println!("{}", decode(&payload)?.summary());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod connector;
pub mod datacube;
pub mod decode;
pub mod error;
pub mod templates;
pub mod transport;

pub use config::ClientConfig;
pub use connector::Connector;
pub use datacube::Datacube;
pub use decode::{decode, Decoded};
pub use error::{ClientError, ClientResult};
pub use transport::{Payload, QueryTransport};
