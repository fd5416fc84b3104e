//! Single-account projection and multi-account aggregation

use super::InvestmentAccount;
use crate::finance::{compound_monthly, YearlyBalance};

/// Project one account's balance for `years` years.
///
/// Ages are left at 0 here; the plan engine knows the member's age and fills them in.
pub fn project_account(account: &InvestmentAccount, years: u32) -> Vec<YearlyBalance> {
    compound_monthly(
        account.balance,
        account.monthly_contribution,
        account.annual_return(),
        years,
    )
}

/// Combined yearly balances across several accounts.
///
/// Each account is projected once and the per-year entries are summed. Because
/// a projection over `n` years is a prefix of any longer projection, this gives
/// the same values as re-projecting every account for each year separately.
pub fn aggregate_accounts(accounts: &[InvestmentAccount], years: u32) -> Vec<YearlyBalance> {
    let projections: Vec<Vec<YearlyBalance>> = accounts
        .iter()
        .map(|account| project_account(account, years))
        .collect();

    merge_projections(&projections, years)
}

/// Sum several per-account series into one series of `years` entries.
///
/// A series shorter than `years` contributes its last entry to the remaining
/// years; an empty series contributes nothing. Ages are 0 and the real balance
/// equals the nominal balance.
pub fn merge_projections<S: AsRef<[YearlyBalance]>>(
    projections: &[S],
    years: u32,
) -> Vec<YearlyBalance> {
    (1..=years)
        .map(|year| {
            let index = (year - 1) as usize;
            let mut total = YearlyBalance::empty(year);

            for series in projections {
                let series = series.as_ref();
                let Some(entry) = series.get(index).or_else(|| series.last()) else {
                    continue;
                };
                total.nominal_balance += entry.nominal_balance;
                total.contributions += entry.contributions;
                total.growth += entry.growth;
            }

            total.real_balance = total.nominal_balance;
            total
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::AccountType;
    use approx::assert_relative_eq;

    fn test_accounts() -> Vec<InvestmentAccount> {
        vec![
            InvestmentAccount::new(AccountType::Tsp, 120_000.0, 800.0, 0.07),
            InvestmentAccount::new(AccountType::Roth, 35_000.0, 500.0, 0.065),
            InvestmentAccount::new(AccountType::Taxable, 20_000.0, 0.0, 0.05),
        ]
    }

    /// Re-project every account for each year and take the last entry
    fn naive_aggregate(accounts: &[InvestmentAccount], years: u32) -> Vec<YearlyBalance> {
        let mut results = Vec::new();
        for year in 1..=years {
            let mut total = YearlyBalance::empty(year);
            for account in accounts {
                if let Some(last) = project_account(account, year).last() {
                    total.nominal_balance += last.nominal_balance;
                    total.contributions += last.contributions;
                    total.growth += last.growth;
                }
            }
            total.real_balance = total.nominal_balance;
            results.push(total);
        }
        results
    }

    #[test]
    fn test_project_account_leaves_age_unset() {
        let account = InvestmentAccount::new(AccountType::Other, 10_000.0, 100.0, 0.05);
        let series = project_account(&account, 5);
        assert_eq!(series.len(), 5);
        assert!(series.iter().all(|row| row.age == 0));
        assert_eq!(series[4].year, 5);
    }

    #[test]
    fn test_aggregate_matches_naive_reprojection() {
        let accounts = test_accounts();
        let fast = aggregate_accounts(&accounts, 30);
        let naive = naive_aggregate(&accounts, 30);

        assert_eq!(fast.len(), naive.len());
        for (a, b) in fast.iter().zip(&naive) {
            assert_eq!(a.year, b.year);
            assert_eq!(a.nominal_balance, b.nominal_balance);
            assert_eq!(a.contributions, b.contributions);
            assert_eq!(a.growth, b.growth);
        }
    }

    #[test]
    fn test_aggregate_sums_accounts() {
        let accounts = test_accounts();
        let combined = aggregate_accounts(&accounts, 10);

        let sum_year_10: f64 = accounts
            .iter()
            .map(|a| project_account(a, 10)[9].nominal_balance)
            .sum();
        assert_relative_eq!(combined[9].nominal_balance, sum_year_10, max_relative = 1e-12);
        assert_relative_eq!(combined[0].contributions, (800.0 + 500.0) * 12.0, epsilon = 1e-9);
    }

    #[test]
    fn test_allocation_drives_projection() {
        use crate::finance::Allocation;

        let mixed = InvestmentAccount::new(AccountType::Tsp, 50_000.0, 300.0, 0.0).with_allocation(vec![
            Allocation { percentage: 80.0, expected: 0.075 },
            Allocation { percentage: 20.0, expected: 0.025 },
        ]);
        let flat = InvestmentAccount::new(AccountType::Tsp, 50_000.0, 300.0, 0.065);

        let a = project_account(&mixed, 15);
        let b = project_account(&flat, 15);
        assert_relative_eq!(a[14].nominal_balance, b[14].nominal_balance, max_relative = 1e-12);
    }

    #[test]
    fn test_aggregate_no_accounts() {
        let combined = aggregate_accounts(&[], 3);
        assert_eq!(combined.len(), 3);
        assert!(combined.iter().all(|row| row.nominal_balance == 0.0));
    }

    #[test]
    fn test_merge_clamps_short_series() {
        let long = compound_monthly(1_000.0, 0.0, 0.0, 4);
        let short = compound_monthly(500.0, 0.0, 0.0, 2);
        let merged = merge_projections(&[long, short, Vec::new()], 4);

        assert_eq!(merged.len(), 4);
        assert_relative_eq!(merged[3].nominal_balance, 1_500.0);
    }
}
