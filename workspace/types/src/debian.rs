pub enum DebCommandPayload {
    Package {
        sign: Option<bool>,
        skip_build: bool,
        strict: bool,
    },
    Debian {
        strict: bool,
    },
}

impl DebCommandPayload {
    pub fn is_strict(&self) -> bool {
        match self {
            DebCommandPayload::Package { strict, .. } => *strict,
            DebCommandPayload::Debian { strict } => *strict,
        }
    }
}
