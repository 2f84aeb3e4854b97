use crate::{
    config::CREDENTIAL_ENV_VAR,
    error::{AppError, AppResult},
    models::ProxyParams,
    services::providers::VideoSearchProvider,
};

/// Lower bound for the forwarded result count
pub const MIN_RESULTS: u32 = 1;

/// Bounds applied to the caller-supplied result count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultLimits {
    pub default: u32,
    pub cap: u32,
}

impl Default for ResultLimits {
    fn default() -> Self {
        Self { default: 6, cap: 12 }
    }
}

impl ResultLimits {
    /// Normalizes a raw `max` parameter.
    ///
    /// Absent, non-numeric or zero values give the default; anything else is
    /// clamped into `[MIN_RESULTS, cap]`. A leading integer is accepted even
    /// with trailing junk (`"8abc"` is 8).
    pub fn normalize(&self, raw: Option<&str>) -> u32 {
        let cap = self.cap.max(MIN_RESULTS);
        let default = self.default.clamp(MIN_RESULTS, cap);

        match raw.and_then(parse_leading_int) {
            None | Some(0) => default,
            Some(value) if value < 0 => MIN_RESULTS,
            Some(value) => u32::try_from(value).map_or(cap, |value| value.min(cap)),
        }
    }

    /// Clamps a count the caller already holds as a number
    pub fn bound(&self, requested: u32) -> u32 {
        requested.clamp(MIN_RESULTS, self.cap.max(MIN_RESULTS))
    }
}

/// Parses an optionally signed integer prefix, ignoring leading whitespace
fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    // Saturate huge values; they get clamped anyway.
    let magnitude = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// A validated search ready to forward
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardedSearch {
    pub query: String,
    pub max_results: u32,
}

/// Checks the credential and the query, then normalizes the result count.
///
/// The credential is checked first so a misconfigured server reports that
/// regardless of what the caller sent.
pub fn validate(
    api_key: Option<&str>,
    params: &ProxyParams,
    limits: &ResultLimits,
) -> AppResult<ForwardedSearch> {
    if api_key.map_or(true, |key| key.trim().is_empty()) {
        return Err(AppError::Configuration(CREDENTIAL_ENV_VAR));
    }

    let query = params.q.as_deref().unwrap_or_default().trim();
    if query.is_empty() {
        return Err(AppError::BadRequest(
            "Missing query parameter q".to_string(),
        ));
    }

    Ok(ForwardedSearch {
        query: query.to_string(),
        max_results: limits.normalize(params.max.as_deref()),
    })
}

/// Runs one proxied search and returns the upstream body on success
pub async fn forward_search(
    provider: &dyn VideoSearchProvider,
    api_key: Option<&str>,
    params: &ProxyParams,
    limits: &ResultLimits,
) -> AppResult<String> {
    let search = validate(api_key, params, limits)?;
    // validate() rejected a missing key above
    let api_key = api_key.unwrap_or_default();

    let reply = provider
        .search(api_key, &search.query, search.max_results)
        .await
        .map_err(|e| {
            tracing::error!(
                error = %e,
                provider = provider.name(),
                query = %search.query,
                "Upstream search request failed"
            );
            e
        })?;

    if !reply.is_success() {
        let err = AppError::upstream(reply.status, reply.body);
        tracing::warn!(
            status = reply.status,
            code = ?err.code(),
            provider = provider.name(),
            query = %search.query,
            "Upstream returned an error"
        );
        return Err(err);
    }

    Ok(reply.body)
}
