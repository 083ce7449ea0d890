use std::path::PathBuf;

use clap::Parser;
use ekonovus_core::model::{Address, WasteObjectFilter};
use ekonovus_provider_powerbi::PowerBiConfig;
use tracing_subscriber::filter::LevelFilter;

#[derive(Debug, Parser)]
#[command(
    name = "ekonovus",
    about = "Waste collection schedules for addresses served by Ekonovus",
    version
)]
pub(crate) struct Cli {
    /// Municipality, e.g. "Vilniaus r. sav."
    #[arg(long, env = "EKONOVUS_REGION")]
    pub region: String,

    /// Town or village, e.g. "Vilniaus m."
    #[arg(long, env = "EKONOVUS_DISTRICT")]
    pub district: String,

    /// Street with its type suffix, e.g. "Fabijoniškių g."
    #[arg(long, env = "EKONOVUS_STREET")]
    pub street: String,

    /// House number, e.g. "24-1"
    #[arg(long, env = "EKONOVUS_HOUSE_NUMBER")]
    pub house_number: String,

    /// Waste object code to keep; repeat or comma separate. All objects when omitted
    #[arg(
        long = "waste-object-id",
        env = "EKONOVUS_WASTE_OBJECT_IDS",
        value_delimiter = ','
    )]
    pub waste_object_ids: Vec<String>,

    /// Power BI report resource key
    #[arg(long, env = "EKONOVUS_RESOURCE_KEY", hide_env_values = true)]
    pub resource_key: Option<String>,

    /// Override the report query endpoint
    #[arg(long, env = "EKONOVUS_API_URL")]
    pub api_url: Option<String>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, env = "EKONOVUS_LOG_LEVEL", default_value = "info")]
    pub log_level: LevelFilter,

    /// Write logs to this file (the terminal UI logs nowhere otherwise)
    #[arg(long, env = "EKONOVUS_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Print the schedule to stdout instead of opening the terminal UI
    #[arg(long)]
    pub print: bool,
}

impl Cli {
    pub(crate) fn address(&self) -> Address {
        Address::new(
            self.region.as_str(),
            self.district.as_str(),
            self.street.as_str(),
            &self.house_number,
        )
    }

    pub(crate) fn filter(&self) -> WasteObjectFilter {
        WasteObjectFilter::new(
            self.waste_object_ids
                .iter()
                .map(|code| code.trim())
                .filter(|code| !code.is_empty()),
        )
    }

    pub(crate) fn powerbi_config(&self) -> PowerBiConfig {
        let config = PowerBiConfig::with_resource_key(self.resource_key.clone());
        match &self.api_url {
            Some(api_url) => PowerBiConfig {
                api_url: api_url.clone(),
                ..config
            },
            None => config,
        }
    }
}

#[cfg(test)]
mod tests {
    use ekonovus_core::model::WasteObjectId;
    use ekonovus_provider_powerbi::{API_URL, DEFAULT_RESOURCE_KEY};

    use super::*;

    fn parse(extra: &[&str]) -> Cli {
        let mut args = vec![
            "ekonovus",
            "--region",
            "Klaipėdos r. sav.",
            "--district",
            "Klemiškės II k.",
            "--street",
            "Pumpurų g.",
            "--house-number",
            "5",
        ];
        args.extend_from_slice(extra);
        Cli::try_parse_from(args).expect("valid arguments")
    }

    #[test]
    fn builds_address_from_flags() {
        let cli = parse(&[]);

        assert_eq!(
            cli.address().match_key(),
            "Klemiškės II k. Pumpurų g. 5",
            "match key"
        );
        assert_eq!(cli.log_level, LevelFilter::INFO, "default log level");
        assert!(!cli.print, "terminal UI by default");
    }

    #[test]
    fn waste_object_ids_accept_repeats_and_commas() {
        let cli = parse(&[
            "--waste-object-id",
            "55-L-39605",
            "--waste-object-id",
            "55-P-29313,55-S-1",
        ]);
        let filter = cli.filter();

        assert_eq!(cli.waste_object_ids.len(), 3, "three codes");
        assert!(
            filter.allows(&WasteObjectId::from("55-S-1 (Stiklas)")),
            "comma separated code kept"
        );
        assert!(
            !filter.allows(&WasteObjectId::from("55-X-2 (Pakuotė)")),
            "unlisted code dropped"
        );
    }

    #[test]
    fn missing_filter_keeps_everything() {
        assert!(parse(&[]).filter().is_empty(), "empty allow-list");
    }

    #[test]
    fn report_config_defaults_and_overrides() {
        let defaults = parse(&[]).powerbi_config();
        let custom = parse(&[
            "--resource-key",
            "key-123",
            "--api-url",
            "http://127.0.0.1:9000/querydata",
        ])
        .powerbi_config();

        assert_eq!(defaults.api_url, API_URL, "default endpoint");
        assert_eq!(defaults.resource_key, DEFAULT_RESOURCE_KEY, "default key");
        assert_eq!(custom.api_url, "http://127.0.0.1:9000/querydata", "endpoint");
        assert_eq!(custom.resource_key, "key-123", "key");
    }

    #[test]
    fn address_is_required() {
        assert!(
            Cli::try_parse_from(["ekonovus", "--region", "Vilniaus r. sav."]).is_err(),
            "district, street and house number are required"
        );
    }
}
