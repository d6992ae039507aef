use std::collections::HashMap;

use sdm_config::SdmConfig;
use sdm_io::batch::BatchOutcome;
use uuid::Uuid;

#[derive(Debug)]
pub struct GoalRunOutput<'a> {
    pub config: &'a SdmConfig,
    pub logs: HashMap<Uuid, Vec<String>>,
    pub outcomes: HashMap<Uuid, BatchOutcome>,
}

impl<'a> GoalRunOutput<'a> {
    pub fn new(config: &'a SdmConfig) -> Self {
        Self {
            config,
            logs: HashMap::new(),
            outcomes: HashMap::new(),
        }
    }
}
