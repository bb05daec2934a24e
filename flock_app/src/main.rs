use std::{
    fs,
    io::{self, Write},
};

use anyhow::{Context, Result};
use clap_serde_derive::{clap::Parser, ClapSerde};
use flock_lib::{
    agent::Agent,
    arena::Spawner,
    birdwatcher::{AgentData, Birdwatcher, FlockStats},
    flock::Flock,
    options::SimParams,
};
use log::{debug, info, warn};
use serde::Serialize;

mod cliargs;
mod logging;

use cliargs::{Args, Config};

/// What `--dump` writes to stdout.
#[derive(Serialize)]
struct Report<'a> {
    params: &'a SimParams,
    ticks: u64,
    stats: FlockStats,
    agents: &'a [Agent],
    samples: Vec<AgentData>,
}

fn main() -> Result<()> {
    // Parse whole args with clap
    let mut args = Args::parse();
    let config = load_config(&mut args)?;

    logging::init(config.verbose).context("failed to install logger")?;

    let params = config.sim_params();
    params
        .validate()
        .context("invalid simulation parameters")?;
    let arena = config.arena();
    arena.validate().context("invalid arena")?;

    let mut spawner = Spawner::new(arena, config.seed);
    let mut flock = Flock::new();
    let mut bird_watcher = Birdwatcher::new(config.sample_rate);

    for _ in 0..config.no_agents {
        spawn(&mut flock, &mut spawner);
    }

    info!(
        "spawned {} agents in arena at {:?} r={}, running {} ticks ({:?} search)",
        flock.len(),
        arena.center,
        arena.radius,
        config.steps,
        params.search
    );

    for _ in 0..config.steps {
        if config.spawn_every > 0 && flock.tick() > 0 && flock.tick() % config.spawn_every == 0 {
            spawn(&mut flock, &mut spawner);
        }

        flock.update(&params);

        if bird_watcher.watch(&flock) {
            let stats = FlockStats::of(flock.view());
            info!(
                "tick {:>6}: {} agents, centroid ({:.2}, {:.2}), speed mean {:.4} max {:.4}",
                flock.tick(),
                stats.count,
                stats.centroid.x,
                stats.centroid.y,
                stats.mean_speed,
                stats.max_speed
            );
        }
    }

    let stats = FlockStats::of(flock.view());
    if !(stats.mean_speed.is_finite() && stats.centroid.x.is_finite() && stats.centroid.y.is_finite())
    {
        warn!("flock state is no longer finite after {} ticks", flock.tick());
    }

    let samples = bird_watcher.pop_data();
    debug!("collected {} sample rows", samples.len());

    if config.dump {
        let report = Report {
            params: &params,
            ticks: flock.tick(),
            stats,
            agents: flock.view(),
            samples,
        };

        let stdout = io::stdout();
        let mut out = stdout.lock();
        serde_json::to_writer_pretty(&mut out, &report).context("failed to write report")?;
        writeln!(out).context("failed to write report")?;
    }

    Ok(())
}

/// Merges the config file (if there is one) under the command line arguments.
fn load_config(args: &mut Args) -> Result<Config> {
    match fs::read_to_string(&args.config_path) {
        Ok(text) => {
            let file_config = toml::from_str::<<Config as ClapSerde>::Opt>(&text).with_context(
                || format!("error in configuration file {}", args.config_path.display()),
            )?;
            // merge config already parsed from clap
            Ok(Config::from(file_config).merge(&mut args.config))
        }
        // If there is no config file return only config parsed from clap
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Config::from(&mut args.config)),
        Err(err) => Err(err)
            .with_context(|| format!("can't read configuration file {}", args.config_path.display())),
    }
}

fn spawn(flock: &mut Flock, spawner: &mut Spawner) {
    let event = spawner.next_event();
    if flock.try_spawn(&event, spawner.arena()) {
        debug!(
            "spawned agent {} at ({:.2}, {:.2}) heading {:.1} deg",
            flock.len() - 1,
            event.position.x,
            event.position.y,
            event.heading_deg
        );
    }
}
