pub struct Icons;

impl Icons {
    pub const ROCKET: &str = "🚀";
    pub const CROSS: &str = "❌";
    pub const WARN: &str = "⚠️";
    pub const INFO: &str = "ℹ️";
    pub const STATS: &str = "📊";
    pub const BRAIN: &str = "🧠";
    pub const INBOX: &str = "📥";
}
