//! Default coefficient materialization.

use crate::coefficient::{Coefficient, CoefficientClass};

/// Fills in an omitted coefficient list with distinct unknowns.
///
/// A supplied list is returned unchanged, even when its length is wrong;
/// length checks belong to validation, which runs afterwards. An omitted
/// list of order `n` becomes `[prefix_1, ..., prefix_n]`.
///
/// ```
/// use lagtf_model::{Coefficient, CoefficientClass, materialize_defaults};
///
/// let ma = materialize_defaults(CoefficientClass::Ma, 2, None);
/// assert_eq!(ma, vec![Coefficient::unknown("theta_1"), Coefficient::unknown("theta_2")]);
///
/// let ar = materialize_defaults(CoefficientClass::Ar, 1, Some(vec![0.5.into()]));
/// assert_eq!(ar, vec![Coefficient::Numeric(0.5)]);
/// ```
pub fn materialize_defaults(
    class: CoefficientClass,
    order: usize,
    supplied: Option<Vec<Coefficient>>,
) -> Vec<Coefficient> {
    supplied.unwrap_or_else(|| {
        (1..=order)
            .map(|i| Coefficient::Unknown(class.default_name(i)))
            .collect()
    })
}
