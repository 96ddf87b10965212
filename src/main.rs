use anyhow::{Context, Result, bail};
use skybrief::{BriefingConfig, BriefingRequest, BriefingService, telemetry};

const USAGE: &str = "usage: skybrief <ICAO> <RUNWAY_HEADING> [PRESSURE_ALT_FT] [OAT_C]";

fn parse_number(value: Option<&String>, name: &str) -> Result<Option<f64>> {
    value
        .map(|v| {
            v.parse::<f64>()
                .with_context(|| format!("{name} must be a number, got '{v}'"))
        })
        .transpose()
}

fn parse_request(args: &[String]) -> Result<BriefingRequest> {
    let (Some(icao), Some(heading)) = (args.first(), args.get(1)) else {
        bail!(USAGE);
    };
    let Some(runway_heading_deg) = parse_number(Some(heading), "RUNWAY_HEADING")? else {
        bail!(USAGE);
    };

    Ok(BriefingRequest {
        icao: icao.clone(),
        runway_heading_deg,
        pressure_alt_ft: parse_number(args.get(2), "PRESSURE_ALT_FT")?,
        oat_c: parse_number(args.get(3), "OAT_C")?,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let request = parse_request(&args)?;

    let config = BriefingConfig::load().context("Failed to load configuration")?;
    telemetry::init_tracing(&config.logging)?;

    let service = BriefingService::from_config(&config)?;
    let briefing = service
        .brief(&request)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;

    println!("{}", serde_json::to_string_pretty(&briefing)?);
    Ok(())
}
