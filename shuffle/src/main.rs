use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use shuffle::{Config, Error, ParseMode, config, deck::Deck, read_ops, resolve};

#[derive(Parser, Debug)]
#[command(name = "shuffle")]
#[command(about = "Find which card a repeated slam shuffle leaves at a position", long_about = None)]
struct Args {
    /// Shuffle instructions, one per line
    #[arg(short, long, default_value = "input.txt")]
    input: PathBuf,

    /// Number of cards in the deck
    #[arg(short = 'n', long, default_value_t = config::DECK_SIZE)]
    deck_size: i128,

    /// How many times the whole instruction list is applied
    #[arg(short, long, default_value_t = config::REPS)]
    reps: u64,

    /// Position to look up after the last shuffle
    #[arg(short = 'x', long, default_value_t = config::POSITION)]
    position: i128,

    /// Also report where this card ends up
    #[arg(long)]
    card: Option<i128>,

    /// Read unrecognised lines as "deal into new stack" instead of failing
    #[arg(long, default_value_t = false)]
    lenient: bool,

    /// Cross-check the answer by shuffling a real deck (small decks only)
    #[arg(long, default_value_t = false)]
    simulate: bool,
}

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(args: Args) -> Result<(), Error> {
    let config = Config::new(args.deck_size, args.reps, args.position)?;
    let card = args.card.map(|c| config.check_position(c)).transpose()?;
    let mode = if args.lenient {
        ParseMode::Lenient
    } else {
        ParseMode::Strict
    };

    let ops = read_ops(args.input, mode)?;
    let res = resolve(&ops, &config)?;
    println!("Result: {}", res.card);
    println!("- line: A={}, B={}", res.single.a(), res.single.b());
    println!("- reps: A={}, B={}", res.repeated.a(), res.repeated.b());

    if let Some(card) = card {
        println!("Card {} ends at {}", card, res.position_of(card));
    }

    if args.simulate {
        let n = config.simulated_size()?;
        let deck = Deck::shuffled(&ops, n, config.reps());
        println!("Simulated: {}", deck.cards()[config.position() as usize]);
        let tracked = card.and_then(|c| deck.position_of(c as usize).map(|p| (c, p)));
        if let Some((card, pos)) = tracked {
            println!("Simulated card {} ends at {}", card, pos);
        }
    }
    Ok(())
}
