use crate::eligibility::domain::{ConditionalFlag, EligibilityCriteria, UserProfile, WILDCARD};

/// Single eligibility predicate kind, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Criterion {
    Age,
    Income,
    Category,
    Occupation,
    State,
    Conditional(ConditionalFlag),
}

impl Criterion {
    /// Normalized hint appended to `missing_requirements` on failure.
    ///
    /// Thresholds use lowercase keys; allow-lists use their capitalised name.
    pub(crate) fn requirement_key(self) -> &'static str {
        match self {
            Criterion::Age => "age",
            Criterion::Income => "income",
            Criterion::Category => "Category",
            Criterion::Occupation => "Occupation",
            Criterion::State => "State",
            Criterion::Conditional(flag) => flag.key(),
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            Criterion::Age => "Age",
            Criterion::Income => "Annual income",
            Criterion::Category => "Category",
            Criterion::Occupation => "Occupation",
            Criterion::State => "State",
            Criterion::Conditional(flag) => flag.label(),
        }
    }
}

/// Pass/fail fact for one applicable criterion.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CriterionCheck {
    pub criterion: Criterion,
    pub passed: bool,
    pub reason: String,
    pub action: Option<&'static str>,
    pub diff: Option<String>,
}

impl CriterionCheck {
    fn pass(criterion: Criterion, reason: String) -> Self {
        Self {
            criterion,
            passed: true,
            reason,
            action: None,
            diff: None,
        }
    }

    fn fail(
        criterion: Criterion,
        reason: String,
        action: &'static str,
        diff: Option<String>,
    ) -> Self {
        Self {
            criterion,
            passed: false,
            reason,
            action: Some(action),
            diff,
        }
    }
}

/// Evaluator output: one check per applicable criterion.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct CriteriaFacts {
    pub checks: Vec<CriterionCheck>,
}

impl CriteriaFacts {
    pub(crate) fn total_checks(&self) -> usize {
        self.checks.len()
    }

    pub(crate) fn passed_checks(&self) -> usize {
        self.checks.iter().filter(|check| check.passed).count()
    }

    pub(crate) fn failures(&self) -> impl Iterator<Item = &CriterionCheck> {
        self.checks.iter().filter(|check| !check.passed)
    }
}

pub(crate) const AGE_MIN_ACTION: &str = "Re-check after reaching the minimum age";
pub(crate) const AGE_MAX_ACTION: &str = "Explore schemes without an age ceiling";
pub(crate) const INCOME_ACTION: &str =
    "Update your income certificate if your income has dropped, or explore schemes with a higher income limit";
pub(crate) const CATEGORY_ACTION: &str = "Look for schemes open to your social category";
pub(crate) const OCCUPATION_ACTION: &str = "Explore schemes targeted at your occupation";
pub(crate) const STATE_ACTION: &str = "Look for an equivalent scheme run by your state government";
pub(crate) const CONDITIONAL_ACTION: &str =
    "Only applicants meeting this condition can apply; update your profile if it applies to you";

pub(crate) fn evaluate_criteria(
    criteria: &EligibilityCriteria,
    profile: &UserProfile,
) -> CriteriaFacts {
    let mut checks = Vec::new();

    if let Some(check) = check_age(criteria, profile) {
        checks.push(check);
    }

    if let Some(limit) = criteria.income_limit {
        checks.push(check_income(limit, profile.annual_income));
    }

    if let Some(categories) = criteria.categories.as_deref() {
        checks.push(check_allow_list(
            Criterion::Category,
            categories,
            &profile.category,
            true,
        ));
    }

    if let Some(occupations) = criteria.occupation_list() {
        checks.push(check_allow_list(
            Criterion::Occupation,
            occupations,
            &profile.occupation,
            false,
        ));
    }

    if let Some(states) = criteria.states.as_deref() {
        checks.push(check_allow_list(
            Criterion::State,
            states,
            &profile.state,
            true,
        ));
    }

    for flag in criteria.conditionals.required() {
        let criterion = Criterion::Conditional(flag);
        if profile.flags.has(flag) {
            checks.push(CriterionCheck::pass(
                criterion,
                format!("Meets the '{}' condition", flag.label()),
            ));
        } else {
            checks.push(CriterionCheck::fail(
                criterion,
                format!("Scheme requires '{}'", flag.label()),
                CONDITIONAL_ACTION,
                None,
            ));
        }
    }

    CriteriaFacts { checks }
}

fn check_age(criteria: &EligibilityCriteria, profile: &UserProfile) -> Option<CriterionCheck> {
    if !criteria.has_age_bounds() {
        return None;
    }

    let age = profile.age;
    let below_min = criteria.min_age.filter(|min| age < *min);
    let above_max = criteria.max_age.filter(|max| age > *max);

    let check = match (below_min, above_max) {
        (Some(min), _) => CriterionCheck::fail(
            Criterion::Age,
            format!("Age {age} is below the minimum age of {min}"),
            AGE_MIN_ACTION,
            Some(format_years(min - age)),
        ),
        (None, Some(max)) => CriterionCheck::fail(
            Criterion::Age,
            format!("Age {age} is above the maximum age of {max}"),
            AGE_MAX_ACTION,
            Some(format_years(age - max)),
        ),
        (None, None) => CriterionCheck::pass(
            Criterion::Age,
            format!(
                "Age {age} is within the eligible range ({})",
                describe_age_range(criteria.min_age, criteria.max_age)
            ),
        ),
    };

    Some(check)
}

fn check_income(limit: f64, income: f64) -> CriterionCheck {
    if income > limit {
        CriterionCheck::fail(
            Criterion::Income,
            format!(
                "Annual income {} exceeds the limit of {}",
                format_amount(income),
                format_amount(limit)
            ),
            INCOME_ACTION,
            Some(format!("{} above the limit", format_amount(income - limit))),
        )
    } else {
        CriterionCheck::pass(
            Criterion::Income,
            format!(
                "Annual income {} is within the limit of {}",
                format_amount(income),
                format_amount(limit)
            ),
        )
    }
}

fn check_allow_list(
    criterion: Criterion,
    allowed: &[String],
    value: &str,
    wildcard: bool,
) -> CriterionCheck {
    if wildcard && allowed.iter().any(|entry| entry == WILDCARD) {
        return CriterionCheck::pass(
            criterion,
            format!("{} requirement is open to all", criterion.label()),
        );
    }

    if allowed.iter().any(|entry| entry == value) {
        CriterionCheck::pass(
            criterion,
            format!("{} '{}' is eligible", criterion.label(), value),
        )
    } else {
        let action = match criterion {
            Criterion::Category => CATEGORY_ACTION,
            Criterion::Occupation => OCCUPATION_ACTION,
            _ => STATE_ACTION,
        };
        CriterionCheck::fail(
            criterion,
            format!(
                "{} '{}' is not eligible (allowed: {})",
                criterion.label(),
                value,
                allowed.join(", ")
            ),
            action,
            None,
        )
    }
}

fn describe_age_range(min: Option<u32>, max: Option<u32>) -> String {
    match (min, max) {
        (Some(min), Some(max)) => format!("{min}-{max} years"),
        (Some(min), None) => format!("{min}+ years"),
        (None, Some(max)) => format!("up to {max} years"),
        (None, None) => "any age".to_string(),
    }
}

pub(crate) fn format_years(years: u32) -> String {
    if years == 1 {
        "1 year".to_string()
    } else {
        format!("{years} years")
    }
}

pub(crate) fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{amount:.0}")
    } else {
        format!("{amount:.2}")
    }
}
