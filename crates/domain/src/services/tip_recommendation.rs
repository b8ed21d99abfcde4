//! Tip recommendation calculator.
//!
//! Pure function from role + optional engagement figures to a three-tier
//! suggestion. An explicit custom amount always wins and collapses the
//! recommendation to a single point.

use crate::models::tip::TipRecommendation;
use crate::models::vendor::VendorRole;

/// Per-role base rates: flat dollar triplet and percentage triplet.
struct RoleRates {
    flat: [i64; 3],
    percentage: [f64; 3],
}

/// Closed switch over the four known roles. Unknown role strings are
/// mapped to `Coordinator` at the boundary before reaching this table.
fn base_rates(role: VendorRole) -> RoleRates {
    match role {
        VendorRole::Officiant => RoleRates {
            flat: [50, 100, 200],
            percentage: [15.0, 20.0, 25.0],
        },
        VendorRole::Coordinator => RoleRates {
            flat: [100, 200, 300],
            percentage: [15.0, 20.0, 25.0],
        },
        VendorRole::SetupAttendant => RoleRates {
            flat: [20, 40, 60],
            percentage: [15.0, 20.0, 25.0],
        },
        VendorRole::Photographer => RoleRates {
            flat: [100, 200, 400],
            percentage: [15.0, 20.0, 25.0],
        },
    }
}

/// Compute the three-tier tip suggestion for an engagement.
///
/// - `custom` set: all tiers equal the rounded custom amount.
/// - Both `hours` and `rate` present: tier = round(hours x rate x pct/100).
/// - Otherwise: the role's flat triplet.
pub fn recommend(
    role: VendorRole,
    hours: Option<f64>,
    rate: Option<f64>,
    custom: Option<f64>,
) -> TipRecommendation {
    if let Some(amount) = custom {
        let amount = amount.round() as i64;
        return TipRecommendation {
            low: amount,
            medium: amount,
            high: amount,
        };
    }

    let rates = base_rates(role);

    if let (Some(hours), Some(rate)) = (hours, rate) {
        let total = hours * rate;
        let tier = |pct: f64| (total * pct / 100.0).round() as i64;
        TipRecommendation {
            low: tier(rates.percentage[0]),
            medium: tier(rates.percentage[1]),
            high: tier(rates.percentage[2]),
        }
    } else {
        TipRecommendation {
            low: rates.flat[0],
            medium: rates.flat[1],
            high: rates.flat[2],
        }
    }
}

/// Educational tipping-etiquette copy for each role, shown next to the
/// suggestion in the tipping UI.
pub fn etiquette(role: VendorRole) -> &'static [&'static str] {
    match role {
        VendorRole::Officiant => &[
            "Tip your officiant 10-20% of their fee, or $50-$100 minimum",
            "Consider extra if they traveled far or accommodated special requests",
            "Cash in an envelope is traditional, but digital payments work too",
        ],
        VendorRole::Coordinator => &[
            "Wedding coordinators often receive 15-20% of their fee",
            "They work long hours - consider tipping $100-$300 based on service level",
            "A heartfelt note along with the tip means a lot",
        ],
        VendorRole::SetupAttendant => &[
            "Setup staff typically receive $20-$50 per person",
            "Consider the physical demands and hours worked",
            "Tip more for exceptional service or challenging conditions",
        ],
        VendorRole::Photographer => &[
            "Photography tips range from $50-$200 depending on package size",
            "Not required if gratuity is built into contract",
            "Consider extra for going above and beyond",
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_triplet_without_engagement_figures() {
        let rec = recommend(VendorRole::Officiant, None, None, None);
        assert_eq!(
            rec,
            TipRecommendation {
                low: 50,
                medium: 100,
                high: 200
            }
        );

        let rec = recommend(VendorRole::SetupAttendant, None, None, None);
        assert_eq!(
            rec,
            TipRecommendation {
                low: 20,
                medium: 40,
                high: 60
            }
        );
    }

    #[test]
    fn test_percentage_of_service_total() {
        // 8h x $25 = $200; 15/20/25% of that.
        let rec = recommend(VendorRole::Photographer, Some(8.0), Some(25.0), None);
        assert_eq!(
            rec,
            TipRecommendation {
                low: 30,
                medium: 40,
                high: 50
            }
        );
    }

    #[test]
    fn test_percentage_results_are_rounded() {
        // 3h x $33 = $99; 15% = 14.85 -> 15, 20% = 19.8 -> 20, 25% = 24.75 -> 25.
        let rec = recommend(VendorRole::Coordinator, Some(3.0), Some(33.0), None);
        assert_eq!(
            rec,
            TipRecommendation {
                low: 15,
                medium: 20,
                high: 25
            }
        );
    }

    #[test]
    fn test_hours_without_rate_falls_back_to_flat() {
        let rec = recommend(VendorRole::Photographer, Some(8.0), None, None);
        assert_eq!(
            rec,
            TipRecommendation {
                low: 100,
                medium: 200,
                high: 400
            }
        );
    }

    #[test]
    fn test_custom_amount_collapses_all_tiers() {
        for role in [
            VendorRole::Officiant,
            VendorRole::Coordinator,
            VendorRole::SetupAttendant,
            VendorRole::Photographer,
        ] {
            let rec = recommend(role, Some(8.0), Some(25.0), Some(75.0));
            assert_eq!(
                rec,
                TipRecommendation {
                    low: 75,
                    medium: 75,
                    high: 75
                }
            );
        }
    }

    #[test]
    fn test_etiquette_has_copy_for_every_role() {
        for role in [
            VendorRole::Officiant,
            VendorRole::Coordinator,
            VendorRole::SetupAttendant,
            VendorRole::Photographer,
        ] {
            assert!(!etiquette(role).is_empty());
        }
    }
}
