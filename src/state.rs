use crate::config::Config;
use crate::designers::DesignerRegistry;
use crate::proficiency::Track;
use crate::sessions::DragSessions;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

pub struct AppState {
    pub config: Config,
    pub start_time: Instant,
    pub designers: DesignerRegistry,
    pub sessions: DragSessions,
}

impl AppState {
    pub fn new(config: Config) -> Arc<Self> {
        let designers = DesignerRegistry::new(PathBuf::from(&config.data_dir));
        let sessions = DragSessions::new(Track::new(config.track_length, config.track_direction));

        Arc::new(Self {
            config,
            start_time: Instant::now(),
            designers,
            sessions,
        })
    }

    pub fn uptime_secs(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }
}
