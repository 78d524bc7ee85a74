use std::{fmt, sync::Arc};

use crate::infra::config::Config;
use crate::media::records::MediaRecordStore;
use crate::telegram::client::BotApi;

/// Shared, read-only handles cloned into every request handler. There is no
/// mutable in-process state: the store and the Bot API are the only places
/// anything is written.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub records: Arc<dyn MediaRecordStore>,
    pub bot: Arc<dyn BotApi>,
}

impl AppState {
    pub fn new(
        config: Arc<Config>,
        records: Arc<dyn MediaRecordStore>,
        bot: Arc<dyn BotApi>,
    ) -> Self {
        Self {
            config,
            records,
            bot,
        }
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
