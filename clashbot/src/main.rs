use std::{
    fs,
    io::{self, Read, Write},
    path::Path,
    process,
};

use clap::{App, Arg, ArgMatches};
use eyre::{eyre, WrapErr};
use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;

use clashbattleship::{
    bot::PresetPlacement, Bot, BotConfig, BotState, Coordinate, GameState, Orientation, ShipType,
};

fn main() {
    pretty_env_logger::init();

    let matches = App::new("clashbot")
        .version("1.0")
        .author("Zachary Stewart <zachary@zstewart.com>")
        .about("Reads a battleship game snapshot and prints the bot's next move as JSON.")
        .arg(
            Arg::with_name("STATE")
                .help("game snapshot JSON file, or - to read it from stdin")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("state_file")
                .long("state-file")
                .value_name("PATH")
                .help("keep the bot's memory between calls in this JSON file")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("PATH")
                .help("TOML file with bot settings")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("place")
                .short("p")
                .long("place")
                .value_name("SHIP:ROW,COL:DIR")
                .help("override the preset position of a ship, e.g. ship_1x4:6,2:H")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1),
        )
        .get_matches();

    if let Err(err) = run(&matches) {
        eprintln!("ERROR: {:#}", err);
        process::exit(1);
    }
}

/// Make one decision and print it on a single line of stdout.
fn run(matches: &ArgMatches) -> eyre::Result<()> {
    let mut config = match matches.value_of("config") {
        Some(path) => load_config(Path::new(path))?,
        None => BotConfig::default(),
    };
    if let Some(places) = matches.values_of("place") {
        for place in places {
            config.set_preset(parse_place(place)?);
        }
    }
    config.validate().wrap_err("invalid bot configuration")?;

    let state_file = matches.value_of("state_file").map(Path::new);
    let state = match state_file {
        Some(path) => load_state(path)?,
        None => BotState::new(),
    };

    // Required by clap.
    let source = matches.value_of("STATE").unwrap_or("-");
    let game = read_game(source)?;

    let mut bot = Bot::with_state(config, state);
    let decision = bot.decide(&game);
    let line = serde_json::to_string(&decision).wrap_err("could not encode the decision")?;

    if let Some(path) = state_file {
        save_state(path, bot.state())?;
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", line).wrap_err("could not write the decision")?;
    Ok(())
}

fn load_config(path: &Path) -> eyre::Result<BotConfig> {
    let text = fs::read_to_string(path)
        .wrap_err_with(|| format!("could not read config {}", path.display()))?;
    let config = parse_config(&text)
        .wrap_err_with(|| format!("could not parse config {}", path.display()))?;
    debug!("loaded config from {}", path.display());
    Ok(config)
}

fn parse_config(text: &str) -> eyre::Result<BotConfig> {
    Ok(toml::from_str(text)?)
}

/// Parse a `SHIP:ROW,COL:DIR` preset override.
fn parse_place(arg: &str) -> eyre::Result<PresetPlacement> {
    static PLACE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(
            r"^(?x)
        (?P<ship>\w+)\s*:\s*
        (?P<row>[0-9]+)\s*,\s*(?P<col>[0-9]+)\s*:\s*
        (?P<dir>[HhVv])$",
        )
        .unwrap()
    });

    let captures = PLACE
        .captures(arg.trim())
        .ok_or_else(|| eyre!("invalid placement {:?}, expected SHIP:ROW,COL:DIR", arg))?;
    let ship = ShipType::from_name(&captures["ship"])
        .ok_or_else(|| eyre!("unknown ship {:?} in {:?}", &captures["ship"], arg))?;
    let row = captures["row"]
        .parse()
        .wrap_err_with(|| format!("invalid row in {:?}", arg))?;
    let col = captures["col"]
        .parse()
        .wrap_err_with(|| format!("invalid column in {:?}", arg))?;
    let direction = match &captures["dir"] {
        "H" | "h" => Orientation::Horizontal,
        _ => Orientation::Vertical,
    };
    Ok(PresetPlacement::new(ship, Coordinate::new(row, col), direction))
}

/// Load saved bot state. A missing file means this is the first call of a game.
fn load_state(path: &Path) -> eyre::Result<BotState> {
    if !path.exists() {
        info!("no saved state at {}, starting fresh", path.display());
        return Ok(BotState::new());
    }
    let text = fs::read_to_string(path)
        .wrap_err_with(|| format!("could not read state {}", path.display()))?;
    serde_json::from_str(&text)
        .wrap_err_with(|| format!("could not parse state {}", path.display()))
}

fn save_state(path: &Path, state: &BotState) -> eyre::Result<()> {
    let text = serde_json::to_string(state).wrap_err("could not encode bot state")?;
    fs::write(path, text).wrap_err_with(|| format!("could not write state {}", path.display()))
}

fn read_game(source: &str) -> eyre::Result<GameState> {
    if source == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .wrap_err("could not read snapshot from stdin")?;
        return GameState::from_json(&text).wrap_err("could not parse snapshot from stdin");
    }
    let file = fs::File::open(source).wrap_err_with(|| format!("could not open {}", source))?;
    GameState::from_reader(io::BufReader::new(file))
        .wrap_err_with(|| format!("could not parse snapshot {}", source))
}
