//! A client for NAV's grunnbeløp API.

use super::{BaseAmount, BaseAmountSource};
use anyhow::Error;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use surf::Url;

/// Fetches the current base amount over HTTP.
pub struct Client {
    client: surf::Client,
    url: Url,
}

impl Client {
    /// Create a client for the grunnbeløp API at `url`.
    pub fn new(url: Url) -> Self {
        Self {
            client: surf::Client::new(),
            url,
        }
    }
}

#[async_trait]
impl BaseAmountSource for Client {
    async fn fetch(&self) -> Result<BaseAmount, Error> {
        tracing::info!(url = %self.url, "grunnbeløp request");
        let mut res = self
            .client
            .get(self.url.clone())
            .await
            .map_err(|err| Error::msg(format!("unable to reach grunnbeløp API: {err}")))?;
        if !res.status().is_success() {
            let status: u16 = res.status().into();
            let body = res.body_string().await.unwrap_or_default();
            return Err(Error::msg(format!(
                "grunnbeløp API returned {status}: {body}"
            )));
        }

        let body: Response = res
            .body_json()
            .await
            .map_err(|err| Error::msg(format!("malformed grunnbeløp response: {err}")))?;
        tracing::info!(
            grunnbelop = body.grunnbelop,
            dato = ?body.dato,
            per_month = ?body.per_month,
            average_per_year = ?body.average_per_year,
            omregningsfaktor = ?body.omregningsfaktor,
            "grunnbeløp response"
        );
        BaseAmount::new(body.grunnbelop)
    }
}

/// The body of a grunnbeløp API response.
///
/// NAV responds with
/// ```json
/// {
///     "dato": "2024-05-01",
///     "grunnbeløp": 124028,
///     "grunnbeløpPerMåned": 10336,
///     "gjennomsnittPerÅr": 122225,
///     "omregningsfaktor": 1.045591
/// }
/// ```
/// Only `grunnbeløp` is required.
#[derive(Clone, Debug, Deserialize, Serialize)]
struct Response {
    #[serde(rename = "grunnbeløp")]
    grunnbelop: f64,
    /// The date from which this base amount applies.
    dato: Option<String>,
    #[serde(rename = "grunnbeløpPerMåned")]
    per_month: Option<f64>,
    #[serde(rename = "gjennomsnittPerÅr")]
    average_per_year: Option<f64>,
    omregningsfaktor: Option<f64>,
}

#[cfg(test)]
mod test {
    use super::*;
    use async_std::task::{sleep, spawn};
    use portpicker::pick_unused_port;
    use serde_json::{json, Value};
    use std::time::Duration;

    /// Serve `body` with HTTP status `status` from a local server, returning the endpoint URL.
    async fn serve(status: u16, body: Value) -> Url {
        let port = pick_unused_port().unwrap();
        let mut app = tide::new();
        app.at("/api/v1/grunnbelop")
            .get(move |_req: tide::Request<()>| {
                let body = body.clone();
                async move {
                    let mut res = tide::Response::new(status);
                    res.set_body(tide::Body::from_json(&body)?);
                    Ok::<_, tide::Error>(res)
                }
            });
        spawn(app.listen(format!("127.0.0.1:{port}")));

        let url: Url = format!("http://127.0.0.1:{port}/api/v1/grunnbelop")
            .parse()
            .unwrap();
        wait_for_server(&url).await;
        url
    }

    async fn wait_for_server(url: &Url) {
        const MAX_CONNECT_RETRIES: usize = 60;

        for _ in 0..MAX_CONNECT_RETRIES {
            match surf::get(url).await {
                Ok(_) => return,
                Err(err) => {
                    tracing::warn!("waiting for server to start: {err}");
                    sleep(Duration::from_millis(100)).await;
                }
            }
        }
        panic!("timed out waiting for server");
    }

    #[async_std::test]
    async fn test_fetch() {
        let url = serve(
            200,
            json!({
                "dato": "2024-05-01",
                "grunnbeløp": 124028,
                "grunnbeløpPerMåned": 10336,
                "gjennomsnittPerÅr": 122225,
                "omregningsfaktor": 1.045591,
                "virkningstidspunktForMinsteinntekt": "2024-06-03"
            }),
        )
        .await;
        let g = Client::new(url).fetch().await.unwrap();
        assert_eq!(g.value(), 124028.0);
    }

    #[async_std::test]
    async fn test_fetch_minimal() {
        let url = serve(200, json!({ "grunnbeløp": 118620 })).await;
        assert_eq!(Client::new(url).fetch().await.unwrap().value(), 118620.0);
    }

    #[async_std::test]
    async fn test_fetch_error_status() {
        let url = serve(503, json!({ "feil": "utilgjengelig" })).await;
        let err = Client::new(url).fetch().await.unwrap_err();
        assert!(err.to_string().contains("503"), "{err}");
    }

    #[async_std::test]
    async fn test_fetch_missing_amount() {
        let url = serve(200, json!({ "dato": "2024-05-01" })).await;
        Client::new(url).fetch().await.unwrap_err();
    }

    #[async_std::test]
    async fn test_fetch_zero_amount() {
        let url = serve(200, json!({ "grunnbeløp": 0 })).await;
        Client::new(url).fetch().await.unwrap_err();
    }

    #[async_std::test]
    async fn test_options_load_from_api() {
        let url = serve(200, json!({ "grunnbeløp": 124028 })).await;
        let opt = crate::base_amount::Options {
            g_api_url: url,
            base_amount: None,
        };
        assert_eq!(opt.load().await.unwrap().value(), 124028.0);
    }
}
