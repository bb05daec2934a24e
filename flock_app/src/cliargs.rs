use clap_serde_derive::{
    clap::{self, Parser},
    serde::Serialize,
    ClapSerde,
};
use flock_lib::{
    arena::Arena,
    options::{SearchStrategy, SimParams},
};
use glam::DVec2;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Headless driver for the boids (Reynolds '86) flocking step.
pub struct Args {
    /// Config file (TOML), values on the command line win
    #[arg(short, long = "config", default_value = "config.toml")]
    pub config_path: std::path::PathBuf,

    /// Rest of arguments
    #[command(flatten)]
    pub config: <Config as ClapSerde>::Opt,
}

#[derive(ClapSerde, Serialize)]
/// Programatic configuration
///
/// Uses defaults, which can be overwritten by specifying a filepath for the `-c` or `--config` arg option
pub struct Config {
    #[default(64)]
    #[arg(short = 'n', long = "no-agents")]
    /// number of agents spawned before the first tick
    pub no_agents: usize,

    #[default(600)]
    #[arg(long)]
    /// number of ticks to run
    pub steps: u64,

    #[default(42)]
    #[arg(long)]
    /// seed for spawn positions and headings
    pub seed: u64,

    #[default(60)]
    #[arg(short = 'r', long = "sample-rate")]
    /// ratio of ticks/samples, e.g. 4 = sample every 4th tick
    pub sample_rate: u64,

    #[default(0)]
    #[arg(long = "spawn-every")]
    /// spawn one more agent every this many ticks, 0 = never
    pub spawn_every: u64,

    #[default(50.)]
    #[arg(long = "vision")]
    pub vision_radius: f64,
    #[default(15.)]
    #[arg(long = "avoid")]
    pub avoid_radius: f64,

    #[default(0.005)]
    #[arg(long = "sep-gain")]
    pub separation_gain: f64,
    #[default(0.005)]
    #[arg(long = "ali-gain")]
    pub alignment_gain: f64,
    #[default(0.003)]
    #[arg(long = "coh-gain")]
    pub cohesion_gain: f64,
    #[default(0.0005)]
    #[arg(long = "cen-gain")]
    pub centering_gain: f64,
    #[default(0.005)]
    #[arg(long = "pos-gain")]
    pub position_gain: f64,

    #[default(640.)]
    #[arg(long = "center-x")]
    pub center_x: f64,
    #[default(360.)]
    #[arg(long = "center-y")]
    pub center_y: f64,

    #[default(0.)]
    #[arg(long = "max-speed")]
    /// speed cap, 0 = uncapped
    pub max_speed: f64,

    #[default(false)]
    #[arg(long = "spatial-hash")]
    /// use the spatial hash instead of the O(n^2) neighbour scan
    pub spatial_hash: bool,

    #[default(300.)]
    #[arg(long = "arena-radius")]
    /// spawns are only accepted within this distance of the center
    pub arena_radius: f64,

    #[default(false)]
    #[arg(short = 'v', long)]
    pub verbose: bool,

    #[default(false)]
    #[arg(long)]
    /// print the final snapshot and samples as JSON on stdout
    pub dump: bool,
}

impl Config {
    pub fn center(&self) -> DVec2 {
        DVec2::new(self.center_x, self.center_y)
    }

    pub fn sim_params(&self) -> SimParams {
        SimParams {
            vision_radius: self.vision_radius,
            avoid_radius: self.avoid_radius,
            separation_gain: self.separation_gain,
            alignment_gain: self.alignment_gain,
            cohesion_gain: self.cohesion_gain,
            centering_gain: self.centering_gain,
            center: self.center(),
            position_gain: self.position_gain,
            max_speed: if self.max_speed == 0. {
                None
            } else {
                Some(self.max_speed)
            },
            search: if self.spatial_hash {
                SearchStrategy::SpatialHash
            } else {
                SearchStrategy::Naive
            },
        }
    }

    pub fn arena(&self) -> Arena {
        Arena::new(self.center(), self.arena_radius)
    }
}
