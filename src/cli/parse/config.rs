use clap::ArgMatches;

use otter_simp::{config::Config, types::err};

use super::cli::TECHNIQUE_SWITCHES;

pub fn config_from_args(args: &ArgMatches) -> Result<Config, err::ConfigError> {
    let mut the_config = Config::default();

    if let Ok(Some(techniques)) = args.try_get_one::<String>("techniques") {
        the_config.techniques = Some(techniques.clone())
    };

    for (id, _, option) in TECHNIQUE_SWITCHES {
        if let Ok(Some(true)) = args.try_get_one::<bool>(id) {
            the_config.set_option(option, "false")?
        };
    }

    if let Ok(Some(value)) = args.try_get_one::<bool>("compress") {
        the_config.compress.value = *value
    };

    if let Ok(Some(value)) = args.try_get_one::<bool>("unlimited") {
        the_config.unlimited.value = *value
    };

    if let Ok(Some(value)) = args.try_get_one::<bool>("randomized") {
        the_config.randomized.value = *value
    };

    if let Ok(Some(seed)) = args.try_get_one::<u64>("seed") {
        the_config.seed.set(*seed)?
    };

    if let Ok(Some(solutions)) = args.try_get_one::<i64>("solutions") {
        the_config.solutions.set(*solutions)?
    };

    if let Ok(Some(secs)) = args.try_get_one::<f64>("time_limit") {
        match std::time::Duration::try_from_secs_f64(*secs) {
            Ok(limit) => the_config.time_limit = Some(limit),
            Err(_) => return Err(err::ConfigError::OutOfRange("time_limit")),
        }
    };

    if let Ok(Some(limit)) = args.try_get_one::<u32>("variable_limit") {
        the_config.variable_limit.set(*limit)?
    };

    if let Ok(Some(limit)) = args.try_get_one::<usize>("clause_limit") {
        the_config.clause_limit.set(*limit)?
    };

    if let Ok(Some(options)) = args.try_get_many::<String>("option") {
        for option in options {
            match option.split_once('=') {
                Some((name, value)) => the_config.set_option(name.trim(), value.trim())?,
                None => return Err(err::ConfigError::UnknownOption(option.clone())),
            }
        }
    };

    Ok(the_config)
}

#[cfg(test)]
mod config_tests {
    use super::*;
    use crate::parse::cli::cli;

    #[test]
    fn switches_and_options() {
        let matches = cli().get_matches_from([
            "otter_simp",
            "formula.wcnf",
            "--no-bve",
            "--compress",
            "--set",
            "bve_shrink=2",
            "-s",
            "probe_double=0",
        ]);
        let config = config_from_args(&matches).unwrap();
        assert!(!config.bve.value);
        assert!(config.compress.value);
        assert_eq!(config.bve_shrink.value, 2);
        assert_eq!(config.probe_double.value, 0);
    }

    #[test]
    fn unknown_option() {
        let matches = cli().get_matches_from(["otter_simp", "formula.wcnf", "--set", "glue=2"]);
        assert_eq!(
            config_from_args(&matches).err(),
            Some(err::ConfigError::UnknownOption("glue".to_string()))
        );
    }
}
