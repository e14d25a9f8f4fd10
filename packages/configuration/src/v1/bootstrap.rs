use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Bootstrap {
    /// JSON file with the world timeline: an array of time indexes, each one
    /// with the `list` of per-country counters.
    #[serde(default = "Bootstrap::default_timeline_path")]
    pub timeline_path: Utf8PathBuf,
}

impl Default for Bootstrap {
    fn default() -> Self {
        Self {
            timeline_path: Self::default_timeline_path(),
        }
    }
}

impl Bootstrap {
    fn default_timeline_path() -> Utf8PathBuf {
        Utf8PathBuf::from("./share/default/timeline.json")
    }
}
