//! Role-gated navigation.
//!
//! The current role is passed in by the caller; nothing here reads session
//! state.

use hdash_model::NavItem;

const ALL_HEALTH_ROLES: &[&str] = &["user", "h-admin", "s-admin"];
const HEALTH_ADMIN_ROLES: &[&str] = &["h-admin", "s-admin"];
const ALL_SECTOR_ROLES: &[&str] = &["user", "acct", "audit", "h-admin", "s-admin"];

/// Entries visible to `role`.
///
/// Leaf entries are kept when they list the role. Sections keep only their
/// visible children and disappear when none remain; a section's own role
/// list is not consulted. Without a role nothing is visible.
pub fn filter_for_role(items: &[NavItem], role: Option<&str>) -> Vec<NavItem> {
    let Some(role) = role else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| {
            if item.has_children() {
                let children = filter_for_role(&item.children, Some(role));
                if children.is_empty() {
                    None
                } else {
                    Some(NavItem {
                        children,
                        ..item.clone()
                    })
                }
            } else if item.allows(role) {
                Some(item.clone())
            } else {
                None
            }
        })
        .collect()
}

/// Strips trailing slashes; an empty result is `/`.
pub fn normalize_path(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

/// Whether the entry at `href` is active for `pathname`.
///
/// The dashboard root only matches itself; every other entry also matches
/// paths nested below it, on a `/` boundary.
pub fn is_active(href: &str, pathname: &str) -> bool {
    let href = normalize_path(href);
    let pathname = normalize_path(pathname);
    if pathname == href {
        return true;
    }
    if href == "/dashboard" {
        return false;
    }
    pathname
        .strip_prefix(href)
        .is_some_and(|rest| rest.starts_with('/') || href == "/")
}

/// First visible leaf entry active for `pathname`, depth first.
pub fn active_entry<'a>(items: &'a [NavItem], pathname: &str) -> Option<&'a NavItem> {
    items.iter().find_map(|item| {
        if item.has_children() {
            active_entry(&item.children, pathname)
        } else {
            item.href
                .as_deref()
                .filter(|href| is_active(href, pathname))
                .map(|_| item)
        }
    })
}

/// The dashboard's navigation tree.
pub fn default_navigation() -> Vec<NavItem> {
    vec![
        NavItem::section(
            "Health",
            ALL_HEALTH_ROLES,
            vec![
                NavItem::link("Dashboard", "/dashboard/", ALL_HEALTH_ROLES),
                NavItem::link("Demography", "/dashboard/demography", ALL_HEALTH_ROLES),
                NavItem::link(
                    "Health Facilities",
                    "/dashboard/health-facilities",
                    ALL_HEALTH_ROLES,
                ),
                NavItem::link(
                    "Zonal Health Facilities",
                    "/dashboard/zonal-health-facilities",
                    ALL_HEALTH_ROLES,
                ),
                NavItem::link("Human Resource", "/dashboard/human-resource", ALL_HEALTH_ROLES),
                NavItem::link("Health Finance", "/dashboard/health-finance", ALL_HEALTH_ROLES),
                NavItem::link(
                    "Zonal Health Finance",
                    "/dashboard/zonal-health-finance",
                    ALL_HEALTH_ROLES,
                ),
                NavItem::link("Score Cards", "/dashboard/score-card", ALL_HEALTH_ROLES),
                NavItem::link("Data Upload", "/dashboard/upload-data", HEALTH_ADMIN_ROLES),
                NavItem::link("Register User", "/dashboard/register", HEALTH_ADMIN_ROLES),
            ],
        ),
        NavItem::link(
            "Agriculture",
            "https://ngf-frontend-agric.vercel.app/",
            ALL_SECTOR_ROLES,
        ),
        NavItem::link(
            "Education",
            "https://ngf-frontend-agric.vercel.app/",
            ALL_SECTOR_ROLES,
        ),
        NavItem::link("Accounts", "/dashboard/account", &["acct"]),
        NavItem::link("Currencies", "/dashboard/currency", &["acct"]),
        NavItem::link("Categories", "/dashboard/category", &["acct"]),
        NavItem::link("Transaction", "/dashboard/transaction", &["acct", "audit", "admin"]),
        NavItem::link("Audit", "/dashboard/audit", &["audit", "admin"]),
    ]
}
