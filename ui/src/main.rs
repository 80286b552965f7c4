//! Terminal frontend that prints the generations of a cellular automaton.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use std::sync::mpsc;

use casim_core::factory;
use casim_core::prelude::*;

mod args;
mod glyphs;

use args::Args;
use glyphs::{render, Glyph};

fn main() -> Result<()> {
    simple_logger::init()?;
    info!("Starting casim v{} ...", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    let config = args.to_config()?;
    let automaton = factory::build(&args.kind, &config)
        .with_context(|| format!("Unable to build automaton {:?}", args.kind))?;
    debug!("Built {} automaton: {}", automaton.kind(), automaton.rule_name());

    match automaton {
        AnyAutomaton::GameOfLife(a) => run(a, &args, &config),
        AnyAutomaton::BryansBrain(a) => run(a, &args, &config),
        AnyAutomaton::Rule110(a) => run(a, &args, &config),
        AnyAutomaton::LangtonsAnt(a) => run(a, &args, &config),
        AnyAutomaton::Wator(a) => run(a, &args, &config),
        AnyAutomaton::CoDi(a) => run(a, &args, &config),
    }
}

/// Prints the initial generation and then `args.generations` more, either
/// stepping on demand or playing continuously.
fn run<C>(automaton: Automaton<C>, args: &Args, config: &AutomatonConfig) -> Result<()>
where
    C: Cell,
    C::State: Glyph,
{
    println!("{}", automaton.rule());
    let controller = Controller::new(automaton);
    print!("{}", render(&controller.snapshot()));

    if config.automatic {
        let (tx, rx) = mpsc::channel();
        controller.play(args.interval(), move |generation| {
            // The receiver hangs up once it has printed enough.
            let _ = tx.send(generation);
        });
        for generation in rx.iter() {
            let generation = generation.context("Playback halted")?;
            print!("{}", render(&generation));
            if generation.index >= args.generations {
                break;
            }
        }
        controller.pause();
    } else {
        for _ in 0..args.generations {
            let generation = controller.step().context("Step failed")?;
            print!("{}", render(&generation));
        }
    }
    info!("Stopped at generation {}", controller.generation_count());
    Ok(())
}
