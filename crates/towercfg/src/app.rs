use clap::{Arg, ArgAction, Command, builder::BoolishValueParser};

pub fn build_cli() -> Command {
    Command::new("towercfg")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect the connection settings resolved for a Tower/AWX controller")
        .long_about("towercfg merges /etc/tower/tower_cli.cfg, ~/.tower_cli.cfg, .tower_cli.cfg files in the working directory and its ancestors, ./tower_cli.cfg, an optional explicit config file, and direct parameters into the settings a Tower/AWX client would use.")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("host")
                .long("host")
                .env("TOWER_HOST")
                .help("Controller URL or hostname (overrides config files)")
                .global(true)
        )
        .arg(
            Arg::new("username")
                .long("username")
                .env("TOWER_USERNAME")
                .help("Username (overrides config files)")
                .global(true)
        )
        .arg(
            Arg::new("password")
                .long("password")
                .env("TOWER_PASSWORD")
                .hide_env_values(true)
                .help("Password (overrides config files)")
                .global(true)
        )
        .arg(
            Arg::new("verify-certs")
                .long("verify-certs")
                .visible_alias("tower-verify-ssl")
                .env("TOWER_VERIFY_SSL")
                .value_parser(BoolishValueParser::new())
                .help("Verify TLS certificates: yes/no, true/false, on/off, 1/0")
                .global(true)
        )
        .arg(
            Arg::new("oauth-token")
                .long("oauth-token")
                .env("TOWER_OAUTH_TOKEN")
                .hide_env_values(true)
                .help("OAuth2 token (overrides config files)")
                .global(true)
        )
        .arg(
            Arg::new("config-file")
                .long("config-file")
                .help("Config file loaded after all discovered files; must exist")
                .global(true)
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("show")
                .about("Print the resolved connection settings")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output in JSON format")
                        .action(ArgAction::SetTrue)
                )
        )
        .subcommand(
            Command::new("sources")
                .about("List the config files considered, in precedence order")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output in JSON format")
                        .action(ArgAction::SetTrue)
                )
        )
}
