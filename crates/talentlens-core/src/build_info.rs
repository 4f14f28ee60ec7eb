/// Compile-time build metadata for the talentlens binaries.
#[derive(Debug, Clone, Copy)]
pub struct BuildInfo {
    pub version: &'static str,
    pub git_sha: &'static str,
    pub timestamp: &'static str,
    pub target: &'static str,
}

const fn env_or<'a>(value: Option<&'a str>, default: &'a str) -> &'a str {
    match value {
        Some(v) => v,
        None => default,
    }
}

pub const BUILD_INFO: BuildInfo = BuildInfo {
    version: env!("CARGO_PKG_VERSION"),
    git_sha: env_or(option_env!("TALENTLENS_BUILD_GIT_SHA"), "unknown"),
    timestamp: env_or(option_env!("TALENTLENS_BUILD_TIMESTAMP"), "unknown"),
    target: env_or(option_env!("TALENTLENS_BUILD_TARGET"), "unknown"),
};

impl BuildInfo {
    pub fn version_line(self, binary_name: &str) -> String {
        format!(
            "{binary_name} {} (rev {}, built {}, target {})",
            self.version, self.git_sha, self.timestamp, self.target
        )
    }

    /// Short form for headers: `v0.1.0@abc1234`.
    pub fn compact(self) -> String {
        let mut out = format!("v{}", self.version);
        if self.git_sha != "unknown" {
            out.push('@');
            out.extend(self.git_sha.chars().take(7));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_omits_unknown_sha() {
        let info = BuildInfo {
            version: "1.2.3",
            git_sha: "unknown",
            timestamp: "unknown",
            target: "unknown",
        };
        assert_eq!(info.compact(), "v1.2.3");
    }

    #[test]
    fn compact_truncates_sha() {
        let info = BuildInfo {
            version: "1.2.3",
            git_sha: "0123456789abcdef",
            timestamp: "unknown",
            target: "unknown",
        };
        assert_eq!(info.compact(), "v1.2.3@0123456");
        assert!(info
            .version_line("talentlens")
            .starts_with("talentlens 1.2.3 (rev 0123456789abcdef"));
    }
}
