//! The national insurance base amount (grunnbeløp, or G).
//!
//! Every threshold in the dagpenger rules is expressed as a multiple of G, which NAV adjusts each
//! year. The current value is normally obtained from NAV's grunnbeløp API, but a fixed value can
//! be supplied for offline use.

use anyhow::Error;
use async_trait::async_trait;
use clap::Args;
use serde::{Deserialize, Serialize};
use surf::Url;

mod client;
mod fixed;

pub use client::Client;
pub use fixed::Fixed;

/// The default location of NAV's grunnbeløp API.
pub const DEFAULT_API_URL: &str = "https://g.nav.no/api/v1/grunnbeløp";

/// A source for the current base amount.
#[async_trait]
pub trait BaseAmountSource {
    /// Get the base amount currently in effect.
    async fn fetch(&self) -> Result<BaseAmount, Error>;
}

/// The base amount, with helpers for the multiples of G used by the dagpenger rules.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(try_from = "f64")]
pub struct BaseAmount(f64);

impl TryFrom<f64> for BaseAmount {
    type Error = Error;

    fn try_from(kroner: f64) -> Result<Self, Self::Error> {
        Self::new(kroner)
    }
}

impl BaseAmount {
    /// Wrap a base amount given in kroner.
    ///
    /// Fails unless `kroner` is a positive, finite number.
    pub fn new(kroner: f64) -> Result<Self, Error> {
        if kroner.is_finite() && kroner > 0.0 {
            Ok(Self(kroner))
        } else {
            Err(Error::msg(format!(
                "base amount must be a positive number of kroner, got {kroner}"
            )))
        }
    }

    /// The base amount in kroner.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// The total base amount over `years` years.
    pub fn total_for_years(&self, years: u32) -> f64 {
        self.0 * years as f64
    }

    /// How much a person must have earned in the last year to be entitled to dagpenger (1.5G).
    pub fn minimum_income_for_entitlement(&self) -> f64 {
        self.0 * 1.5
    }

    /// The highest annual income basis a daily rate can be computed from (6G).
    pub fn max_annual_basis(&self) -> f64 {
        self.0 * 6.0
    }
}

/// Options for obtaining the base amount.
#[derive(Clone, Debug, Args)]
pub struct Options {
    /// URL of NAV's grunnbeløp API.
    #[clap(long, env = "G_API_URL", default_value = DEFAULT_API_URL)]
    pub g_api_url: Url,

    /// Use a fixed base amount of KRONER instead of querying the API.
    #[clap(short = 'g', long, env = "DAGPENGER_BASE_AMOUNT", value_name = "KRONER")]
    pub base_amount: Option<f64>,
}

impl Options {
    /// Obtain the base amount, either the fixed one or the latest from the API.
    pub async fn load(&self) -> Result<BaseAmount, Error> {
        match self.base_amount {
            Some(kroner) => Fixed::new(kroner).fetch().await,
            None => Client::new(self.g_api_url.clone()).fetch().await,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::load_env_from;
    use clap::Parser;
    use std::{env, fs};

    #[derive(Parser)]
    struct Cli {
        #[clap(flatten)]
        g: Options,
    }

    fn parse(args: &[&str]) -> Options {
        Cli::try_parse_from(["dagsats"].iter().chain(args)).unwrap().g
    }

    #[test]
    fn test_multiples() {
        let g = BaseAmount::new(124028.0).unwrap();
        assert_eq!(g.value(), 124028.0);
        assert_eq!(g.total_for_years(3), 372084.0);
        assert_eq!(g.minimum_income_for_entitlement(), 186042.0);
        assert_eq!(g.max_annual_basis(), 744168.0);
    }

    #[test]
    fn test_invalid() {
        for kroner in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(BaseAmount::new(kroner).is_err(), "{kroner} should be rejected");
        }
    }

    #[test]
    fn test_deserialize_validates() {
        let g: BaseAmount = serde_json::from_str("124028").unwrap();
        assert_eq!(g.value(), 124028.0);
        assert_eq!(serde_json::to_string(&g).unwrap(), "124028.0");

        for json in ["0", "-118620", "\"124028\""] {
            serde_json::from_str::<BaseAmount>(json).unwrap_err();
        }
    }

    #[async_std::test]
    async fn test_options_fixed() {
        let opt = Options {
            g_api_url: "http://localhost:1".parse().unwrap(),
            base_amount: Some(118620.0),
        };
        assert_eq!(opt.load().await.unwrap().value(), 118620.0);
    }

    #[test]
    fn test_options_environment() {
        // The process environment is shared by all tests in this binary, so every case that
        // touches G_API_URL or DAGPENGER_BASE_AMOUNT lives in this one test.
        env::remove_var("G_API_URL");
        env::remove_var("DAGPENGER_BASE_AMOUNT");

        let opt = parse(&[]);
        assert_eq!(opt.g_api_url, Url::parse(DEFAULT_API_URL).unwrap());
        assert_eq!(opt.base_amount, None);

        // Environment fallbacks.
        env::set_var("G_API_URL", "http://localhost:8080/g");
        env::set_var("DAGPENGER_BASE_AMOUNT", "118620");
        let opt = parse(&[]);
        assert_eq!(opt.g_api_url.as_str(), "http://localhost:8080/g");
        assert_eq!(opt.base_amount, Some(118620.0));

        // The command line takes precedence over the environment.
        let opt = parse(&["--g-api-url", "http://example.com/g", "-g", "124028"]);
        assert_eq!(opt.g_api_url.as_str(), "http://example.com/g");
        assert_eq!(opt.base_amount, Some(124028.0));

        // A missing env file is not an error, and an existing one feeds the fallbacks.
        env::remove_var("G_API_URL");
        env::remove_var("DAGPENGER_BASE_AMOUNT");
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        assert_eq!(load_env_from(&path).unwrap(), None);

        fs::write(
            &path,
            "G_API_URL=http://localhost:9090/g\nDAGPENGER_BASE_AMOUNT=130160\n",
        )
        .unwrap();
        assert_eq!(load_env_from(&path).unwrap(), Some(path.clone()));
        let opt = parse(&[]);
        assert_eq!(opt.g_api_url.as_str(), "http://localhost:9090/g");
        assert_eq!(opt.base_amount, Some(130160.0));

        // Variables already set are not overridden by the env file.
        env::set_var("DAGPENGER_BASE_AMOUNT", "1");
        load_env_from(&path).unwrap();
        assert_eq!(parse(&[]).base_amount, Some(1.0));

        let malformed = dir.path().join("malformed.env");
        fs::write(&malformed, "this is not an assignment\n").unwrap();
        load_env_from(&malformed).unwrap_err();

        env::remove_var("G_API_URL");
        env::remove_var("DAGPENGER_BASE_AMOUNT");
    }
}
