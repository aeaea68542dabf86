use crate::config::non_blank;

pub const HOSTED_TOKEN_ENV: &str = "BUBBLE_HOSTED_VIDEO_TOKEN";

/// Third-party hosted video identified by an opaque token.
///
/// Construction fails closed: a missing or blank token yields `None` and the
/// hosted page renders nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostedEmbed {
    token: String,
}

impl HostedEmbed {
    pub fn new(token: impl Into<String>) -> Option<Self> {
        non_blank(Some(token.into())).map(|token| Self { token })
    }

    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        lookup(HOSTED_TOKEN_ENV).and_then(Self::new)
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

#[cfg(test)]
mod tests {
    use super::HostedEmbed;

    #[test]
    fn absent_token_fails_closed() {
        assert!(HostedEmbed::from_lookup(|_| None).is_none());
    }

    #[test]
    fn blank_token_fails_closed() {
        assert!(HostedEmbed::from_lookup(|_| Some("   ".to_owned())).is_none());
    }

    #[test]
    fn trims_present_token() {
        let embed = HostedEmbed::from_lookup(|key| {
            (key == "BUBBLE_HOSTED_VIDEO_TOKEN").then(|| " abc123 ".to_owned())
        })
        .expect("token present");

        assert_eq!(embed.token(), "abc123");
    }
}
