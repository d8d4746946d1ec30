use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const ENV_M_COST: &str = "ACCOUNTS_ARGON2_M_COST";
pub const ENV_T_COST: &str = "ACCOUNTS_ARGON2_T_COST";
pub const ENV_P_COST: &str = "ACCOUNTS_ARGON2_P_COST";
pub const ENV_OUTPUT_LEN: &str = "ACCOUNTS_ARGON2_OUTPUT_LEN";

/// Cost parameters for the Argon2id slow hash.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SlowHashSettings {
    /// Memory cost in KiB.
    #[serde(default = "SlowHashSettings::default_m_cost")]
    pub m_cost: u32,
    /// Number of iterations.
    #[serde(default = "SlowHashSettings::default_t_cost")]
    pub t_cost: u32,
    /// Degree of parallelism.
    #[serde(default = "SlowHashSettings::default_p_cost")]
    pub p_cost: u32,
    /// Hash output length in bytes; argon2 default when unset.
    #[serde(default)]
    pub output_len: Option<usize>,
}

impl SlowHashSettings {
    fn default_m_cost() -> u32 { argon2::Params::DEFAULT_M_COST }
    fn default_t_cost() -> u32 { argon2::Params::DEFAULT_T_COST }
    fn default_p_cost() -> u32 { argon2::Params::DEFAULT_P_COST }

    /// Read overrides from `ACCOUNTS_ARGON2_*`. Unset variables keep their default.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut s = Self::default();
        if let Some(v) = lookup(ENV_M_COST) { s.m_cost = parse_var(ENV_M_COST, &v)?; }
        if let Some(v) = lookup(ENV_T_COST) { s.t_cost = parse_var(ENV_T_COST, &v)?; }
        if let Some(v) = lookup(ENV_P_COST) { s.p_cost = parse_var(ENV_P_COST, &v)?; }
        if let Some(v) = lookup(ENV_OUTPUT_LEN) { s.output_len = Some(parse_var(ENV_OUTPUT_LEN, &v)?); }
        s.validate()?;
        Ok(s)
    }

    /// Load settings from a JSON file, falling back to defaults when it does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() { return Ok(Self::default()); }
        let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        let s: Self = serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))?;
        s.validate()?;
        Ok(s)
    }

    /// Reject parameters argon2 would refuse at hash time.
    pub fn validate(&self) -> Result<()> {
        self.params().map(|_| ())
    }

    pub(crate) fn params(&self) -> Result<argon2::Params> {
        argon2::Params::new(self.m_cost, self.t_cost, self.p_cost, self.output_len)
            .map_err(|e| anyhow!("invalid argon2 parameters: {}", e))
    }
}

impl Default for SlowHashSettings {
    fn default() -> Self {
        Self {
            m_cost: Self::default_m_cost(),
            t_cost: Self::default_t_cost(),
            p_cost: Self::default_p_cost(),
            output_len: None,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    raw.trim().parse::<T>().map_err(|e| anyhow!("{}='{}': {}", name, raw, e))
}
