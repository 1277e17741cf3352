use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

use duo8::{loader, Chip8, Config, FadeConfig, PlaneSelector, Quirks, Resolution};

mod keymap;
mod run;

/// Runs a ROM headlessly and prints the final frame
#[derive(Parser, Debug)]
#[command(name = "duo8", version, about, long_about = None)]
struct Args {
    /// Path to the ROM file to run
    rom: PathBuf,

    #[arg(short, long, default_value_t = 1000, help = "Instructions to execute")]
    cycles: usize,

    #[arg(long, default_value_t = 10, help = "Instructions per 60Hz tick")]
    per_tick: usize,

    #[arg(long, help = "Seed for CXKK so runs are reproducible")]
    seed: Option<u64>,

    #[arg(long, help = "8XY6/8XYE shift VY into VX")]
    shift_uses_vy: bool,

    #[arg(long, help = "BNNN adds VX instead of V0")]
    jump_offset_uses_vx: bool,

    #[arg(long, help = "FX55/FX65 advance I past the last register")]
    index_advances: bool,

    #[arg(long, help = "8XY5/8XY7 write VF before the difference")]
    flag_before_result: bool,

    #[arg(long, help = "Start in 128x64")]
    hires: bool,

    #[arg(long, default_value_t = 1, help = "Initial plane selector (0-3)")]
    planes: u8,

    #[arg(long, help = "Disable pixel fade")]
    no_fade: bool,

    #[arg(long, default_value_t = 0.1, help = "Fade intensity lost per tick")]
    fade_speed: f32,

    #[arg(long, default_value = "", help = "Keys held for the whole run, e.g. \"qw\"")]
    hold: String,

    #[arg(long, value_parser = keymap::parse_binding, help = "Extra key binding, e.g. p=1")]
    bind: Vec<(char, u8)>,

    #[arg(long, help = "Print the ROM and its disassembly instead of running it")]
    dump: bool,

    #[arg(short, long, help = "Log every executed instruction")]
    verbose: bool,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            quirks: Quirks {
                shift_uses_vy: self.shift_uses_vy,
                jump_offset_uses_vx: self.jump_offset_uses_vx,
                index_advances: self.index_advances,
                flag_before_result: self.flag_before_result,
            },
            fade: FadeConfig {
                enabled: !self.no_fade,
                speed: self.fade_speed,
            },
            resolution: if self.hires {
                Resolution::Extended
            } else {
                Resolution::Standard
            },
            selector: PlaneSelector::from_bits(self.planes),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_default_env()
        .filter_module(
            "duo8",
            if args.verbose {
                LevelFilter::Trace
            } else {
                LevelFilter::Info
            },
        )
        .init();

    let rom = loader::load_file(&args.rom)?;
    let config = args.config();
    let mut chip8 = match args.seed {
        Some(seed) => Chip8::with_seed(config, seed),
        None => Chip8::new(config),
    };
    chip8.load_rom(&rom)?;

    if args.dump {
        run::dump(&chip8);
        return Ok(());
    }

    keymap::hold(chip8.keys_mut(), &args.bind, &args.hold)?;
    let summary = run::run(&mut chip8, args.cycles, args.per_tick);
    print!("{}", run::render(&chip8));
    println!("{}", summary);
    Ok(())
}
