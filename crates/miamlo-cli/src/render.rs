//! Terminal rendering for discovery results.
//!
//! Pure string builders so every state the user can see is unit-testable.
//! Every failure state pairs its message with exactly one recovery action.

use miamlo_api::{ChefSummary, PaginationInfo, PlatSummary};
use miamlo_discovery::{page_strip, showing_range, PageEntry, ResultPage};

/// Shown when no usable position is cached.
pub fn location_required() -> String {
    "No position available. Dishes are discovered around you, so a location is needed.\n\
     Run `miamlo locate` to enable it."
        .to_owned()
}

/// Shown when acquisition was declined or failed.
pub fn location_denied() -> String {
    "Could not determine your position.\n\
     Run `miamlo locate` again to retry."
        .to_owned()
}

/// Shown on any fetch failure. The cause is in the logs, not here.
pub fn fetch_failed() -> String {
    "Results could not be loaded.\n\
     Run the same command again to retry."
        .to_owned()
}

/// Zero results: generic when nothing is filtered, reset hint otherwise.
pub fn empty_state(filtered: bool) -> String {
    if filtered {
        "No results match your search or filters.\n\
         Drop the search and filter options to see everything nearby."
            .to_owned()
    } else {
        "Nothing available around you yet. Check back soon!".to_owned()
    }
}

/// A full dishes page: one card per dish plus the pagination footer.
pub fn plat_page(page: &ResultPage<PlatSummary>) -> String {
    let mut out = String::new();
    for plat in &page.items {
        out.push_str(&plat_card(plat));
        out.push('\n');
    }
    out.push_str(&footer(page.pagination.clone(), page.locally_filtered));
    out
}

/// A promotions page: dish cards with the promotion line emphasized.
pub fn promo_page(page: &ResultPage<PlatSummary>) -> String {
    let mut out = String::new();
    for plat in &page.items {
        out.push_str(&plat_card(plat));
        if let Some(saving) = plat.savings() {
            out.push_str(&format!("    save {saving:.2} EUR"));
            if let Some(ends) = plat
                .promotion
                .as_ref()
                .and_then(|promo| promo.reduction_ends.as_deref())
            {
                out.push_str(&format!(" until {ends}"));
            }
            out.push('\n');
        }
        out.push('\n');
    }
    out.push_str(&footer(page.pagination.clone(), page.locally_filtered));
    out
}

/// A chefs page: one card per chef plus the pagination footer.
pub fn chef_page(page: &ResultPage<ChefSummary>) -> String {
    let mut out = String::new();
    for chef in &page.items {
        out.push_str(&chef_card(chef));
        out.push('\n');
    }
    out.push_str(&footer(page.pagination.clone(), page.locally_filtered));
    out
}

fn plat_card(plat: &PlatSummary) -> String {
    let mut line = format!("* {}", plat.name);
    match plat.discounted_price() {
        Some(discounted) => {
            line.push_str(&format!(
                "  {discounted:.2} EUR (was {:.2} EUR",
                plat.price
            ));
            if let Some(promo) = &plat.promotion {
                line.push_str(&format!(", -{:.0}%", promo.reduction_value));
            }
            line.push(')');
        }
        None => line.push_str(&format!("  {:.2} EUR", plat.price)),
    }
    line.push('\n');

    line.push_str(&format!(
        "    chef {} | {} | {} min",
        plat.chef.full_name(),
        rating_label(plat.average_rating),
        plat.estimated_cook_time
    ));
    if let Some(distance) = plat.distance_km {
        line.push_str(&format!(" | {distance:.1} km"));
    }
    line.push_str(if plat.is_chef_open {
        " | open"
    } else {
        " | closed"
    });
    line.push('\n');
    line
}

fn chef_card(chef: &ChefSummary) -> String {
    let mut line = format!(
        "* {}  {} ({} reviews)",
        chef.full_name(),
        rating_label(chef.average_rating),
        chef.total_reviews
    );
    if let Some(distance) = chef.distance_km {
        line.push_str(&format!(" | {distance:.1} km"));
    }
    line.push('\n');

    if !chef.categories.is_empty() {
        line.push_str(&format!("    {}\n", chef.categories.join(", ")));
    }
    if !chef.chef_certifications.is_empty() {
        line.push_str(&format!(
            "    certified: {}\n",
            chef.chef_certifications.join(", ")
        ));
    }
    if let Some(year) = chef.created_at.as_deref().and_then(|date| date.get(..4)) {
        line.push_str(&format!("    member since {year}\n"));
    }
    if let Some(description) = &chef.description {
        line.push_str(&format!("    {description}\n"));
    }
    line
}

/// `4.2` as `4.2*`, an unrated zero as `--`.
fn rating_label(rating: f64) -> String {
    if rating > 0.0 {
        format!("{rating:.1}*")
    } else {
        "--".to_owned()
    }
}

/// "Showing X-Y of N" plus the windowed page strip.
fn footer(pagination: PaginationInfo, locally_filtered: bool) -> String {
    let mut out = String::new();

    let (from, to) = showing_range(
        pagination.current_page,
        pagination.page_size,
        pagination.total_items,
    );
    out.push_str(&format!(
        "Showing {from}-{to} of {}\n",
        pagination.total_items
    ));
    if locally_filtered {
        out.push_str("(counts reflect all nearby results, before your search filter)\n");
    }

    if pagination.total_pages > 1 {
        out.push_str(&strip_line(
            pagination.current_page,
            pagination.total_pages,
        ));
        out.push('\n');
    }
    out
}

/// The page strip as one line: `1 ... 4 [5] 6 ... 10`.
fn strip_line(current: u32, total: u32) -> String {
    page_strip(current, total)
        .into_iter()
        .map(|entry| match entry {
            PageEntry::Page(page) if page == current => format!("[{page}]"),
            PageEntry::Page(page) => page.to_string(),
            PageEntry::Ellipsis => "...".to_owned(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pagination(current: u32, page_size: u32, total_items: u64, total_pages: u32) -> PaginationInfo {
        PaginationInfo {
            current_page: current,
            page_size,
            total_items,
            total_pages,
            has_next_page: current < total_pages,
            has_previous_page: current > 1,
        }
    }

    fn plat(promo: bool) -> PlatSummary {
        let body = serde_json::json!({
            "id": "p1",
            "name": "Couscous royal",
            "estimatedCookTime": 45,
            "price": 20.0,
            "chef": { "id": "c1", "firstName": "Amira", "lastName": "Ben Salah" },
            "averageRating": 4.2,
            "distanceKm": 1.8,
            "isChefOpen": true,
            "promotion": if promo {
                serde_json::json!({
                    "id": "promo1",
                    "reductionValue": 25.0,
                    "reductionEnds": "2026-08-20T22:00:00Z",
                    "isActive": true
                })
            } else {
                serde_json::Value::Null
            }
        });
        serde_json::from_value(body).expect("valid plat JSON")
    }

    #[test]
    fn strip_line_windows_the_middle_of_ten_pages() {
        assert_eq!(strip_line(5, 10), "1 ... 4 [5] 6 ... 10");
    }

    #[test]
    fn strip_line_shows_all_of_five_pages() {
        assert_eq!(strip_line(2, 5), "1 [2] 3 4 5");
    }

    #[test]
    fn footer_shows_range_math() {
        let out = footer(pagination(3, 12, 29, 3), false);
        assert!(out.contains("Showing 25-29 of 29"), "got: {out}");
    }

    #[test]
    fn footer_skips_strip_for_single_page() {
        let out = footer(pagination(1, 12, 5, 1), false);
        assert!(out.contains("Showing 1-5 of 5"));
        assert!(!out.contains('['), "no strip expected: {out}");
    }

    #[test]
    fn footer_flags_locally_filtered_counts() {
        let out = footer(pagination(1, 12, 13, 2), true);
        assert!(out.contains("before your search filter"), "got: {out}");
    }

    #[test]
    fn plat_card_shows_discounted_price() {
        let out = plat_card(&plat(true));
        assert!(out.contains("15.00 EUR (was 20.00 EUR, -25%)"), "got: {out}");
        assert!(out.contains("chef Amira Ben Salah"));
        assert!(out.contains("open"));
    }

    #[test]
    fn plat_card_without_promo_shows_plain_price() {
        let out = plat_card(&plat(false));
        assert!(out.contains("20.00 EUR"), "got: {out}");
        assert!(!out.contains("was"), "got: {out}");
    }

    #[test]
    fn chef_card_shows_rating_reviews_and_member_year() {
        let body = serde_json::json!({
            "id": "c9",
            "firstName": "Karim",
            "lastName": "Haddad",
            "categories": ["Libanais"],
            "chefCertifications": ["HACCP"],
            "averageRating": 4.8,
            "totalReviews": 31,
            "createdAt": "2024-03-01T09:00:00Z",
            "distanceKm": 3.2,
            "description": "Cuisine libanaise"
        });
        let chef: ChefSummary = serde_json::from_value(body).expect("valid chef JSON");
        let out = chef_card(&chef);
        assert!(out.contains("Karim Haddad  4.8* (31 reviews) | 3.2 km"), "got: {out}");
        assert!(out.contains("certified: HACCP"));
        assert!(out.contains("member since 2024"));
    }

    #[test]
    fn unrated_items_show_a_dash() {
        assert_eq!(rating_label(0.0), "--");
        assert_eq!(rating_label(4.25), "4.2*");
    }

    #[test]
    fn empty_state_differs_by_filter_presence() {
        assert!(empty_state(true).contains("Drop the search"));
        assert!(empty_state(false).contains("Nothing available"));
    }
}
