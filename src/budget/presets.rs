//! Built-in budget programs.

use super::types::{BudgetItem, DistributionKind};

/// The seven-item city program: mean costs sum to $9.91B.
pub fn city_program() -> Vec<BudgetItem> {
    use DistributionKind::{Lognormal, Normal};

    vec![
        BudgetItem::new("Free City Buses", "transport", 750_000_000.0, Normal, 50_000_000.0, false),
        BudgetItem::new(
            "Universal Public Childcare",
            "childcare",
            6_000_000_000.0,
            Normal,
            1_500_000_000.0,
            false,
        ),
        BudgetItem::new(
            "Affordable Housing Program",
            "housing",
            2_500_000_000.0,
            Lognormal,
            750_000_000.0,
            true,
        ),
        BudgetItem::new("Five City Grocery Stores", "food", 60_000_000.0, Normal, 15_000_000.0, false),
        BudgetItem::new(
            "Community Safety Department",
            "safety",
            300_000_000.0,
            Normal,
            100_000_000.0,
            false,
        ),
        BudgetItem::new(
            "Green Schools & Climate Retrofits",
            "climate",
            200_000_000.0,
            Lognormal,
            75_000_000.0,
            true,
        ),
        BudgetItem::new(
            "Libraries & Social Services",
            "other",
            100_000_000.0,
            Normal,
            30_000_000.0,
            false,
        ),
    ]
}
