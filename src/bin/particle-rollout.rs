//! Run random-action episodes of a particle environment and print summary statistics.
//!
//! Usage: `particle-rollout [SCENARIO | CONFIG.json] [NUM_EPISODES]`
//!
//! The first argument is either a scenario name or the path to a JSON environment
//! configuration such as `{"scenario": {"name": "team_push"}, "max_episode_steps": 50}`.
use particle_envs::logging::{DisplayLogger, ReportSchedule, StatsLogger};
use particle_envs::simulation::run_random_episodes;
use particle_envs::{BuildEnv, ParticleEnvConfig, ParticleEnvError, Prng, ScenarioConfig};
use rand::SeedableRng;
use std::env;
use std::fs;

const DEFAULT_NUM_EPISODES: u64 = 100;

fn load_config(arg: Option<String>) -> Result<ParticleEnvConfig<ScenarioConfig>, ParticleEnvError> {
    match arg {
        None => Ok(ParticleEnvConfig::default()),
        Some(path) if path.ends_with(".json") => {
            let text = fs::read_to_string(path)?;
            Ok(serde_json::from_str(&text)?)
        }
        Some(name) => Ok(ParticleEnvConfig::new(name.parse()?)),
    }
}

fn parse_num_episodes(arg: Option<String>) -> Result<u64, ParticleEnvError> {
    match arg {
        None => Ok(DEFAULT_NUM_EPISODES),
        Some(value) => value
            .parse()
            .map_err(|source| ParticleEnvError::NumEpisodes { value, source }),
    }
}

fn main() -> Result<(), ParticleEnvError> {
    let mut args = env::args().skip(1);
    let config = load_config(args.next())?;
    let num_episodes = parse_num_episodes(args.next())?;
    println!("Environment:\n{:#?}", config);

    let mut rng = Prng::seed_from_u64(0);
    let mut env = config.build_env(&mut rng)?;
    let mut logger: DisplayLogger = DisplayLogger::new(ReportSchedule::every_episodes(10));
    let summary = run_random_episodes(&mut env, num_episodes, &mut rng, &mut logger)?;
    logger.flush();
    println!("\nRandom Actor Stats\n{}", summary);
    Ok(())
}
