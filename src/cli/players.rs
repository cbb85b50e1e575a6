use crate::agents::{Agent, FirstMoveAgent, RandomAgent};

pub struct CliAgent {
    pub code: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub const CLI_AGENTS: &[CliAgent] = &[
    CliAgent {
        code: "R",
        name: "RandomAgent",
        description: "Chooses moves at random. Optional param is the seed offset.",
    },
    CliAgent {
        code: "F",
        name: "FirstMoveAgent",
        description: "Always plays the smallest legal move.",
    },
];

/// Builds an agent from a code such as `R` or `R:7`.
///
/// `seed` is mixed with any per-agent offset so seats with the same code
/// still play differently.
pub fn create_agent(spec: &str, seed: u64) -> Option<Box<dyn Agent>> {
    let mut parts = spec.split(':');
    let code = parts.next()?.trim().to_uppercase();
    let params: Vec<&str> = parts.collect();

    match code.as_str() {
        "R" => {
            let offset = params
                .first()
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(0);
            Some(Box::new(RandomAgent::new(seed.wrapping_add(offset))))
        }
        "F" => Some(Box::new(FirstMoveAgent)),
        _ => None,
    }
}

pub fn print_agent_help() {
    println!("Agent Legend:");
    println!("{:<5} {:<20} {}", "CODE", "AGENT", "DESCRIPTION");
    println!("{}", "-".repeat(80));
    for agent in CLI_AGENTS {
        println!("{:<5} {:<20} {}", agent.code, agent.name, agent.description);
    }
}
