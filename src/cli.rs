use std::env;
use std::process;

use getopts::Options;
use reqwest::Url;

pub const API_KEY_VAR: &str = "REUNION_EVENTS_API_KEY";
pub const DEFAULT_ENDPOINT: &str =
    "https://v1.slashapi.com/events/google-sheets/FyqwlUzRL2/reunionevent";

#[derive(Debug)]
pub struct Args {
    pub endpoint: Url,
    pub api_key: String,
    pub search: Option<String>,
    pub batch: bool,
}

fn opts() -> Options {
    let mut opts = Options::new();
    opts.optflag(
        "h",
        "help",
        concat!("Print the help output of ", env!("CARGO_PKG_NAME")),
    );
    opts.optopt(
        "e",
        "endpoint",
        "Events API endpoint to fetch from [Default: the reunion sheet]",
        "URL",
    );
    opts.optopt("s", "search", "Initial search text", "TEXT");
    opts.optflag(
        "b",
        "batch",
        "Wait for the events, then run commands from stdin without the banner",
    );
    opts
}

enum Parsed {
    Help(String),
    Run(Args),
}

fn try_parse(args: Vec<String>, api_key: Option<String>) -> Result<Parsed, String> {
    let opts = opts();
    let matches = opts.parse(args).map_err(|fail| fail.to_string())?;

    if matches.opt_present("help") {
        return Ok(Parsed::Help(
            opts.usage(&opts.short_usage(env!("CARGO_PKG_NAME"))),
        ));
    }

    let endpoint = match matches.opt_str("endpoint") {
        Some(raw) => raw
            .parse::<Url>()
            .map_err(|err| format!("Provided value for option 'endpoint' is invalid: {err}"))?,
        None => DEFAULT_ENDPOINT
            .parse()
            .map_err(|err| format!("Default endpoint is invalid: {err}"))?,
    };

    let api_key = api_key
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| format!("`{API_KEY_VAR}` environment variable is not set"))?;

    Ok(Parsed::Run(Args {
        endpoint,
        api_key,
        search: matches.opt_str("search").filter(|s| !s.is_empty()),
        batch: matches.opt_present("batch"),
    }))
}

pub fn parse(args: Vec<String>) -> Args {
    match try_parse(args, env::var(API_KEY_VAR).ok()) {
        Ok(Parsed::Run(args)) => args,
        Ok(Parsed::Help(usage)) => {
            println!("{usage}");
            process::exit(0);
        }
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn run(list: &[&str], api_key: Option<&str>) -> Result<Args, String> {
        match try_parse(args(list), api_key.map(str::to_owned))? {
            Parsed::Run(args) => Ok(args),
            Parsed::Help(_) => Err("help".into()),
        }
    }

    #[test]
    fn defaults() {
        let args = run(&[], Some("secret")).unwrap();
        assert_eq!(args.endpoint.as_str(), DEFAULT_ENDPOINT);
        assert_eq!(args.api_key, "secret");
        assert_eq!(args.search, None);
        assert!(!args.batch);
    }

    #[test]
    fn options() {
        let args = run(
            &["-e", "http://127.0.0.1:9000/events", "--search", "gala", "-b"],
            Some("secret"),
        )
        .unwrap();
        assert_eq!(args.endpoint.as_str(), "http://127.0.0.1:9000/events");
        assert_eq!(args.search.as_deref(), Some("gala"));
        assert!(args.batch);
    }

    #[test]
    fn api_key_is_required() {
        assert!(run(&[], None).unwrap_err().contains(API_KEY_VAR));
        assert!(run(&[], Some("  ")).is_err());
    }

    #[test]
    fn rejects_bad_input() {
        assert!(run(&["--endpoint", "not a url"], Some("secret")).is_err());
        assert!(run(&["--frobnicate"], Some("secret")).is_err());
    }

    #[test]
    fn help_wins() {
        assert!(matches!(
            try_parse(args(&["--help"]), None),
            Ok(Parsed::Help(usage)) if usage.contains("--endpoint")
        ));
    }
}
