use tonic::transport::{Channel, Endpoint};
use tracing::info;

pub mod config;
pub mod stream;

pub mod area {
    tonic::include_proto!("area");
}

use area::area_client::AreaClient;
use area::{CircleRequest, RectangleRequest, SquareRequest};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    InvalidRange(#[from] numgen::RangeError),
    #[error("send interval must be at least 1ms")]
    InvalidInterval,
    #[error("invalid address `{0}`: {1}")]
    InvalidAddress(String, &'static str),
    #[error("failed to connect: {0}")]
    Connect(#[from] tonic::transport::Error),
    #[error("remote call failed: {0}")]
    Rpc(#[from] tonic::Status),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Turns a listen-style address into a plaintext endpoint URI.
/// `:10000` dials the local host, `host:port` gets an `http://` scheme.
pub fn endpoint_uri(addr: &str) -> Result<String> {
    let invalid = |reason| Error::InvalidAddress(addr.to_string(), reason);
    let has_scheme = |scheme: &str| {
        addr.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    };
    if has_scheme("https://") {
        return Err(invalid("transport security is not supported"));
    }
    let authority = if has_scheme("http://") {
        &addr["http://".len()..]
    } else {
        addr
    };
    let (host, port) = authority
        .rsplit_once(':')
        .ok_or_else(|| invalid("missing port"))?;
    if port.is_empty() || port.parse::<u16>().is_err() {
        return Err(invalid("port must be a number between 0 and 65535"));
    }
    let host = if host.is_empty() { "127.0.0.1" } else { host };
    Ok(format!("http://{host}:{port}"))
}

pub async fn connect(addr: &str) -> Result<AreaClient<Channel>> {
    let uri = endpoint_uri(addr)?;
    info!(%uri, "connecting");
    let endpoint = Endpoint::from_shared(uri)
        .map_err(|_| Error::InvalidAddress(addr.to_string(), "not a valid uri"))?;
    let channel = endpoint.connect().await?;
    Ok(AreaClient::new(channel))
}

pub async fn circle(client: &mut AreaClient<Channel>, radius: f64) -> Result<f64> {
    let response = client.circle(CircleRequest { radius }).await?;
    let area = response.into_inner().area;
    info!("Circle area = {area}");
    Ok(area)
}

pub async fn square(client: &mut AreaClient<Channel>, side: f64) -> Result<f64> {
    let response = client.square(SquareRequest { side }).await?;
    let area = response.into_inner().area;
    info!("Square area = {area}");
    Ok(area)
}

pub async fn rectangle(client: &mut AreaClient<Channel>, width: f64, height: f64) -> Result<f64> {
    let response = client.rectangle(RectangleRequest { width, height }).await?;
    let area = response.into_inner().area;
    info!("Rectangle area = {area}");
    Ok(area)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Areas {
    pub circle: f64,
    pub square: f64,
    pub rectangle: f64,
}

/// Issues the three unary calls in order, stopping at the first failure.
pub async fn run_unary_calls(
    client: &mut AreaClient<Channel>,
    shapes: &config::Shapes,
) -> Result<Areas> {
    let circle = circle(client, shapes.radius).await?;
    let square = square(client, shapes.side).await?;
    let rectangle = rectangle(client, shapes.width, shapes.height).await?;
    Ok(Areas {
        circle,
        square,
        rectangle,
    })
}
