//! PAYE worksheet for Ghana monthly payroll.
//!
//! This module implements the monthly Pay-As-You-Earn computation applied
//! to a single employee: the SSNIT statutory deduction followed by a
//! marginal walk over the graduated income tax bands for the tax year.
//!
//! # Worksheet Structure
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Gross income = basic income + allowances |
//! | 2    | SSNIT contribution = basic income × 5.5% (employee share) |
//! | 3    | Taxable income = gross income − SSNIT − tax relief |
//! | 4    | PAYE tax = marginal walk over the year's bands |
//! | 5    | Net income = gross income − SSNIT − PAYE tax |
//!
//! Each band taxes only the slice of income falling within it, never the
//! whole income at the top marginal rate. The final band is open-ended and
//! absorbs whatever income remains.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use paye_core::TaxBracket;
//! use paye_core::calculations::PayeWorksheet;
//! use paye_core::models::PayeInput;
//!
//! // 2024 monthly bands.
//! let brackets = vec![
//!     TaxBracket { threshold: Some(dec!(402)), rate: dec!(0) },
//!     TaxBracket { threshold: Some(dec!(550)), rate: dec!(5) },
//!     TaxBracket { threshold: Some(dec!(670)), rate: dec!(10) },
//!     TaxBracket { threshold: Some(dec!(3000)), rate: dec!(17.5) },
//!     TaxBracket { threshold: Some(dec!(16461)), rate: dec!(25) },
//!     TaxBracket { threshold: None, rate: dec!(30) },
//! ];
//!
//! let worksheet = PayeWorksheet::new(&brackets);
//! let breakdown = worksheet.calculate(&PayeInput {
//!     basic_income: dec!(1000),
//!     allowances: dec!(0),
//!     tax_relief: dec!(0),
//! });
//!
//! assert_eq!(breakdown.ssnit_contribution, dec!(55.000));
//! assert_eq!(breakdown.taxable_income, dec!(945.000));
//! assert_eq!(breakdown.paye_tax, dec!(67.525));
//! ```

use rust_decimal::Decimal;
use tracing::warn;

use crate::models::{PayeBreakdown, PayeInput, TaxBracket};

/// Calculator for one monthly PAYE computation.
///
/// Borrows the bracket sequence for a single tax year, sorted by ascending
/// threshold with the last bracket unbounded (the shape
/// [`crate::models::BracketTable`] guarantees).
#[derive(Debug, Clone)]
pub struct PayeWorksheet<'a> {
    brackets: &'a [TaxBracket],
    ssnit_rate: Decimal,
}

impl<'a> PayeWorksheet<'a> {
    /// Creates a worksheet over the given bracket sequence, using the
    /// statutory 5.5% employee share for the SSNIT contribution.
    pub fn new(brackets: &'a [TaxBracket]) -> Self {
        Self {
            brackets,
            ssnit_rate: Decimal::new(55, 3),
        }
    }

    /// Calculates the SSNIT contribution on basic income (Step 2).
    ///
    /// Allowances are not pensionable; only basic income counts. The caller
    /// guarantees a non-negative input.
    pub fn statutory_contribution(
        &self,
        basic_income: Decimal,
    ) -> Decimal {
        basic_income * self.ssnit_rate
    }

    /// Walks the bands and returns the total tax on `taxable_income`
    /// (Step 4).
    ///
    /// Each band receives `min(remaining, width)` of income, taxed at the
    /// band's rate; the open-ended final band takes whatever remains. A
    /// negative `taxable_income` is walked as-is, so a band with a nonzero
    /// rate can contribute negative tax. That mirrors the arithmetic the
    /// net income subtraction downstream expects; nothing clamps here.
    pub fn progressive_tax(
        &self,
        taxable_income: Decimal,
    ) -> Decimal {
        let mut remaining = taxable_income;
        let mut previous = Decimal::ZERO;
        let mut total = Decimal::ZERO;

        for bracket in self.brackets {
            let slice = match bracket.threshold {
                Some(threshold) => remaining.min(threshold - previous),
                None => remaining,
            };
            total += slice * bracket.rate / Decimal::ONE_HUNDRED;
            remaining -= slice;
            if let Some(threshold) = bracket.threshold {
                previous = threshold;
            }
        }

        total
    }

    /// Runs the full worksheet for one validated submission.
    pub fn calculate(
        &self,
        input: &PayeInput,
    ) -> PayeBreakdown {
        let gross_income = input.basic_income + input.allowances;
        let ssnit_contribution = self.statutory_contribution(input.basic_income);
        let taxable_income = gross_income - ssnit_contribution - input.tax_relief;

        if taxable_income < Decimal::ZERO {
            warn!(
                gross_income = %gross_income,
                tax_relief = %input.tax_relief,
                taxable_income = %taxable_income,
                "relief exceeds gross income; taxable income is negative"
            );
        }

        let paye_tax = self.progressive_tax(taxable_income);
        let net_income = gross_income - ssnit_contribution - paye_tax;

        PayeBreakdown {
            gross_income,
            ssnit_contribution,
            taxable_income,
            paye_tax,
            net_income,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    /// 2024 monthly bands.
    fn ghana_2024() -> Vec<TaxBracket> {
        vec![
            TaxBracket {
                threshold: Some(dec!(402)),
                rate: dec!(0),
            },
            TaxBracket {
                threshold: Some(dec!(550)),
                rate: dec!(5),
            },
            TaxBracket {
                threshold: Some(dec!(670)),
                rate: dec!(10),
            },
            TaxBracket {
                threshold: Some(dec!(3000)),
                rate: dec!(17.5),
            },
            TaxBracket {
                threshold: Some(dec!(16461)),
                rate: dec!(25),
            },
            TaxBracket {
                threshold: None,
                rate: dec!(30),
            },
        ]
    }

    fn input(
        basic_income: Decimal,
        allowances: Decimal,
        tax_relief: Decimal,
    ) -> PayeInput {
        PayeInput {
            basic_income,
            allowances,
            tax_relief,
        }
    }

    /// Initializes a tracing subscriber for tests that hit warn paths.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_test_writer()
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    // =========================================================================
    // statutory_contribution tests
    // =========================================================================

    #[test]
    fn statutory_contribution_is_five_point_five_percent_of_basic() {
        let brackets = ghana_2024();
        let worksheet = PayeWorksheet::new(&brackets);

        let result = worksheet.statutory_contribution(dec!(1000));

        assert_eq!(result, dec!(55.000));
    }

    #[test]
    fn statutory_contribution_of_zero_is_zero() {
        let brackets = ghana_2024();
        let worksheet = PayeWorksheet::new(&brackets);

        let result = worksheet.statutory_contribution(dec!(0));

        assert_eq!(result, dec!(0));
    }

    // =========================================================================
    // progressive_tax tests
    // =========================================================================

    #[test]
    fn progressive_tax_of_zero_income_is_zero() {
        let brackets = ghana_2024();
        let worksheet = PayeWorksheet::new(&brackets);

        let result = worksheet.progressive_tax(dec!(0));

        assert_eq!(result, dec!(0));
    }

    #[test]
    fn progressive_tax_within_exempt_band_is_zero() {
        let brackets = ghana_2024();
        let worksheet = PayeWorksheet::new(&brackets);

        let result = worksheet.progressive_tax(dec!(402));

        assert_eq!(result, dec!(0));
    }

    #[test]
    fn progressive_tax_taxes_only_the_slice_above_the_exempt_band() {
        let brackets = ghana_2024();
        let worksheet = PayeWorksheet::new(&brackets);

        // 402 exempt, next 50 at 5%.
        let result = worksheet.progressive_tax(dec!(452));

        assert_eq!(result, dec!(2.5));
    }

    #[test]
    fn progressive_tax_spans_multiple_bands() {
        let brackets = ghana_2024();
        let worksheet = PayeWorksheet::new(&brackets);

        // 402 @ 0% + 148 @ 5% + 120 @ 10% + 275 @ 17.5%
        let result = worksheet.progressive_tax(dec!(945));

        assert_eq!(result, dec!(67.525));
    }

    #[test]
    fn progressive_tax_unbounded_band_absorbs_the_remainder() {
        let brackets = ghana_2024();
        let worksheet = PayeWorksheet::new(&brackets);

        // Up to 16461: 148*0.05 + 120*0.10 + 2330*0.175 + 13461*0.25 = 3792.40
        // Remaining 3539 lands in the 30% band.
        let result = worksheet.progressive_tax(dec!(20000));

        assert_eq!(result, dec!(3792.40) + dec!(3539) * dec!(0.30));
    }

    #[test]
    fn progressive_tax_is_non_decreasing_over_sampled_incomes() {
        let brackets = ghana_2024();
        let worksheet = PayeWorksheet::new(&brackets);

        let mut income = Decimal::ZERO;
        let mut last_tax = Decimal::ZERO;
        while income <= dec!(20000) {
            let tax = worksheet.progressive_tax(income);
            assert!(
                tax >= last_tax,
                "tax decreased from {last_tax} to {tax} at income {income}"
            );
            last_tax = tax;
            income += dec!(7.25);
        }
    }

    #[test]
    fn progressive_tax_is_continuous_at_band_edges() {
        let brackets = ghana_2024();
        let worksheet = PayeWorksheet::new(&brackets);
        let step = dec!(0.01);

        for edge in [dec!(402), dec!(550), dec!(670), dec!(3000), dec!(16461)] {
            let below = worksheet.progressive_tax(edge - step);
            let at = worksheet.progressive_tax(edge);
            let above = worksheet.progressive_tax(edge + step);

            // One cent of income moves the tax by at most one cent times
            // the top marginal rate.
            assert!(at - below <= step * dec!(0.30), "jump below edge {edge}");
            assert!(above - at <= step * dec!(0.30), "jump above edge {edge}");
        }
    }

    #[test]
    fn progressive_tax_on_negative_income_with_exempt_first_band_is_zero() {
        let brackets = ghana_2024();
        let worksheet = PayeWorksheet::new(&brackets);

        // The whole negative amount is consumed by the 0% band, after which
        // nothing remains for the taxed bands.
        let result = worksheet.progressive_tax(dec!(-100));

        assert_eq!(result, dec!(0));
    }

    #[test]
    fn progressive_tax_on_negative_income_with_taxed_first_band_goes_negative() {
        // No exempt band: the negative remainder is "taxed" at 10%.
        // The walk never clamps a band's contribution to zero.
        let brackets = vec![
            TaxBracket {
                threshold: Some(dec!(500)),
                rate: dec!(10),
            },
            TaxBracket {
                threshold: None,
                rate: dec!(20),
            },
        ];
        let worksheet = PayeWorksheet::new(&brackets);

        let result = worksheet.progressive_tax(dec!(-100));

        assert_eq!(result, dec!(-10.0));
    }

    // =========================================================================
    // calculate tests
    // =========================================================================

    #[test]
    fn calculate_basic_income_only() {
        let brackets = ghana_2024();
        let worksheet = PayeWorksheet::new(&brackets);

        let breakdown = worksheet.calculate(&input(dec!(1000), dec!(0), dec!(0)));

        assert_eq!(breakdown.gross_income, dec!(1000));
        assert_eq!(breakdown.ssnit_contribution, dec!(55.000));
        assert_eq!(breakdown.taxable_income, dec!(945.000));
        assert_eq!(breakdown.paye_tax, dec!(67.525));
        assert_eq!(
            breakdown.net_income,
            dec!(1000) - dec!(55.000) - dec!(67.525)
        );
    }

    #[test]
    fn calculate_allowances_raise_gross_but_not_ssnit() {
        let brackets = ghana_2024();
        let worksheet = PayeWorksheet::new(&brackets);

        let breakdown = worksheet.calculate(&input(dec!(1000), dec!(200), dec!(0)));

        assert_eq!(breakdown.gross_income, dec!(1200));
        // SSNIT still on basic income alone.
        assert_eq!(breakdown.ssnit_contribution, dec!(55.000));
        assert_eq!(breakdown.taxable_income, dec!(1145.000));
    }

    #[test]
    fn calculate_relief_reduces_taxable_income_but_not_net_directly() {
        let brackets = ghana_2024();
        let worksheet = PayeWorksheet::new(&brackets);

        let with_relief = worksheet.calculate(&input(dec!(1000), dec!(0), dec!(100)));
        let without_relief = worksheet.calculate(&input(dec!(1000), dec!(0), dec!(0)));

        assert_eq!(with_relief.taxable_income, dec!(845.000));
        // Net income improves only by the tax saved on the relieved slice.
        assert!(with_relief.net_income > without_relief.net_income);
        assert_eq!(with_relief.gross_income, without_relief.gross_income);
    }

    #[test]
    fn calculate_with_relief_exceeding_gross_keeps_the_negative_taxable_income() {
        let _guard = init_test_tracing();
        let brackets = ghana_2024();
        let worksheet = PayeWorksheet::new(&brackets);

        let breakdown = worksheet.calculate(&input(dec!(100), dec!(0), dec!(500)));

        assert_eq!(breakdown.taxable_income, dec!(100) - dec!(5.500) - dec!(500));
        assert_eq!(breakdown.paye_tax, dec!(0));
        assert_eq!(breakdown.net_income, dec!(100) - dec!(5.500));
    }

    #[test]
    fn calculate_zero_everything_is_all_zero() {
        let brackets = ghana_2024();
        let worksheet = PayeWorksheet::new(&brackets);

        let breakdown = worksheet.calculate(&input(dec!(0), dec!(0), dec!(0)));

        assert_eq!(breakdown.gross_income, dec!(0));
        assert_eq!(breakdown.ssnit_contribution, dec!(0));
        assert_eq!(breakdown.taxable_income, dec!(0));
        assert_eq!(breakdown.paye_tax, dec!(0));
        assert_eq!(breakdown.net_income, dec!(0));
    }

    #[test]
    fn calculate_high_earner_reaches_the_top_band() {
        let brackets = ghana_2024();
        let worksheet = PayeWorksheet::new(&brackets);

        let breakdown = worksheet.calculate(&input(dec!(30000), dec!(0), dec!(0)));

        // taxable = 30000 - 1650 = 28350, well past the 16461 threshold.
        assert_eq!(breakdown.taxable_income, dec!(28350.000));
        let expected = dec!(148) * dec!(0.05)
            + dec!(120) * dec!(0.10)
            + dec!(2330) * dec!(0.175)
            + dec!(13461) * dec!(0.25)
            + (dec!(28350) - dec!(16461)) * dec!(0.30);
        assert_eq!(breakdown.paye_tax, expected);
    }
}
