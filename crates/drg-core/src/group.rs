//! Group accumulators shared by the aggregations.

use drg_model::RepresentativePolicy;

use crate::error::{CoreError, Result};

/// Picks the representative text value of a group.
///
/// Missing and empty values are skipped. Under
/// [`RepresentativePolicy::RequireAgreement`] a second distinct value is an
/// error; under [`RepresentativePolicy::FirstSeen`] it is ignored.
#[derive(Debug, Default)]
pub(crate) struct Representative {
    value: Option<String>,
}

impl Representative {
    pub(crate) fn offer(
        &mut self,
        candidate: Option<&str>,
        policy: RepresentativePolicy,
        group: &str,
        field: &'static str,
    ) -> Result<()> {
        let Some(candidate) = candidate.map(str::trim).filter(|v| !v.is_empty()) else {
            return Ok(());
        };
        match &self.value {
            None => self.value = Some(candidate.to_string()),
            Some(first) if first != candidate => {
                if policy == RepresentativePolicy::RequireAgreement {
                    return Err(CoreError::InconsistentGroup {
                        group: group.to_string(),
                        field,
                        first: first.clone(),
                        other: candidate.to_string(),
                    });
                }
            }
            Some(_) => {}
        }
        Ok(())
    }

    pub(crate) fn into_value(self) -> Option<String> {
        self.value
    }
}

/// Keeps the first present value and ignores the rest.
#[derive(Debug, Default)]
pub(crate) struct FirstValue {
    value: Option<String>,
}

impl FirstValue {
    pub(crate) fn offer(&mut self, candidate: Option<&String>) {
        if self.value.is_none()
            && let Some(candidate) = candidate.filter(|v| !v.trim().is_empty())
        {
            self.value = Some(candidate.clone());
        }
    }

    pub(crate) fn into_value(self) -> Option<String> {
        self.value
    }
}

/// Missing values add nothing, so a group of only missing values sums to zero.
pub(crate) fn add(total: &mut f64, value: Option<f64>) {
    if let Some(value) = value {
        *total += value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agreement_skips_blanks_and_rejects_conflicts() {
        let mut rep = Representative::default();
        rep.offer(Some(""), RepresentativePolicy::RequireAgreement, "X", "DRG")
            .unwrap();
        rep.offer(Some("XA1"), RepresentativePolicy::RequireAgreement, "X", "DRG")
            .unwrap();
        rep.offer(None, RepresentativePolicy::RequireAgreement, "X", "DRG")
            .unwrap();
        rep.offer(Some("XA1"), RepresentativePolicy::RequireAgreement, "X", "DRG")
            .unwrap();
        let err = rep
            .offer(Some("XA2"), RepresentativePolicy::RequireAgreement, "X", "DRG")
            .unwrap_err();
        assert!(matches!(err, CoreError::InconsistentGroup { .. }));
        assert_eq!(rep.into_value().as_deref(), Some("XA1"));
    }

    #[test]
    fn first_seen_keeps_first_value() {
        let mut rep = Representative::default();
        rep.offer(Some("XA1"), RepresentativePolicy::FirstSeen, "X", "DRG")
            .unwrap();
        rep.offer(Some("XA2"), RepresentativePolicy::FirstSeen, "X", "DRG")
            .unwrap();
        assert_eq!(rep.into_value().as_deref(), Some("XA1"));
    }

    #[test]
    fn missing_values_sum_to_zero() {
        let mut total = 0.0;
        add(&mut total, None);
        add(&mut total, None);
        assert_eq!(total, 0.0);
        add(&mut total, Some(2.5));
        assert_eq!(total, 2.5);
    }
}
