//! Role-gated navigation.
//!
//! A static table says which roles may open each section. The menu and the
//! route guard both read it, once per navigation, against the user held in
//! the session.

use crate::models::{RecordId, Role, User};

/// Navigable sections of the back office
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Dashboard,
    Clients,
    Subscriptions,
    Employees,
    ActivityLogs,
    Trash,
    Profile,
    Settings,
}

#[derive(Debug, Clone, Copy)]
pub struct NavEntry {
    pub section: Section,
    pub label: &'static str,
    pub route: Route,
    pub roles: &'static [Role],
}

impl NavEntry {
    pub fn allows(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

const EVERYONE: &[Role] = &[Role::Admin, Role::Employee];
const ADMIN_ONLY: &[Role] = &[Role::Admin];

/// Menu order is table order.
pub const NAV_TABLE: &[NavEntry] = &[
    NavEntry {
        section: Section::Dashboard,
        label: "Dashboard",
        route: Route::Dashboard,
        roles: EVERYONE,
    },
    NavEntry {
        section: Section::Clients,
        label: "Clients",
        route: Route::Clients,
        roles: EVERYONE,
    },
    NavEntry {
        section: Section::Subscriptions,
        label: "Subscriptions",
        route: Route::Subscriptions,
        roles: EVERYONE,
    },
    NavEntry {
        section: Section::Employees,
        label: "Employees",
        route: Route::Employees,
        roles: ADMIN_ONLY,
    },
    NavEntry {
        section: Section::ActivityLogs,
        label: "Activity logs",
        route: Route::ActivityLogs,
        roles: ADMIN_ONLY,
    },
    NavEntry {
        section: Section::Trash,
        label: "Recycle bin",
        route: Route::Trash,
        roles: ADMIN_ONLY,
    },
    NavEntry {
        section: Section::Profile,
        label: "Profile",
        route: Route::Profile,
        roles: EVERYONE,
    },
    NavEntry {
        section: Section::Settings,
        label: "Settings",
        route: Route::Settings,
        roles: EVERYONE,
    },
];

/// Where forbidden navigation lands
pub const DEFAULT_ROUTE: Route = Route::Dashboard;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Register,
    Dashboard,
    Clients,
    Client(RecordId),
    Subscriptions,
    Subscription(RecordId),
    Employees,
    Employee(RecordId),
    ActivityLogs,
    Trash,
    Profile,
    Settings,
}

impl Route {
    /// Section a protected route belongs to; `None` for the public pages
    pub fn section(&self) -> Option<Section> {
        match self {
            Route::Login | Route::Register => None,
            Route::Dashboard => Some(Section::Dashboard),
            Route::Clients | Route::Client(_) => Some(Section::Clients),
            Route::Subscriptions | Route::Subscription(_) => Some(Section::Subscriptions),
            Route::Employees | Route::Employee(_) => Some(Section::Employees),
            Route::ActivityLogs => Some(Section::ActivityLogs),
            Route::Trash => Some(Section::Trash),
            Route::Profile => Some(Section::Profile),
            Route::Settings => Some(Section::Settings),
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Route::Login => write!(f, "/login"),
            Route::Register => write!(f, "/register"),
            Route::Dashboard => write!(f, "/dashboard"),
            Route::Clients => write!(f, "/clients"),
            Route::Client(id) => write!(f, "/clients/{}", id),
            Route::Subscriptions => write!(f, "/subscriptions"),
            Route::Subscription(id) => write!(f, "/subscriptions/{}", id),
            Route::Employees => write!(f, "/employees"),
            Route::Employee(id) => write!(f, "/employees/{}", id),
            Route::ActivityLogs => write!(f, "/activity-logs"),
            Route::Trash => write!(f, "/trash"),
            Route::Profile => write!(f, "/profile"),
            Route::Settings => write!(f, "/settings"),
        }
    }
}

impl std::str::FromStr for Route {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let path = s.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();
        let parse_id = |raw: &str| {
            raw.parse::<RecordId>()
                .map_err(|_| format!("Invalid record id in path: {}", s))
        };

        match segments.as_slice() {
            [] | ["dashboard"] => Ok(Route::Dashboard),
            ["login"] => Ok(Route::Login),
            ["register"] => Ok(Route::Register),
            ["clients"] => Ok(Route::Clients),
            ["clients", id] => Ok(Route::Client(parse_id(id)?)),
            ["subscriptions"] | ["abonnements"] => Ok(Route::Subscriptions),
            ["subscriptions", id] | ["abonnements", id] => Ok(Route::Subscription(parse_id(id)?)),
            ["employees"] => Ok(Route::Employees),
            ["employees", id] => Ok(Route::Employee(parse_id(id)?)),
            ["activity-logs"] => Ok(Route::ActivityLogs),
            ["trash"] => Ok(Route::Trash),
            ["profile"] => Ok(Route::Profile),
            ["settings"] => Ok(Route::Settings),
            _ => Err(format!("Unknown page: {}", s)),
        }
    }
}

/// Outcome of a navigation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Allow(Route),
    Redirect(Route),
}

impl Navigation {
    pub fn target(&self) -> Route {
        match self {
            Navigation::Allow(route) | Navigation::Redirect(route) => *route,
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, Navigation::Allow(_))
    }
}

pub fn can_access(role: Role, section: Section) -> bool {
    NAV_TABLE
        .iter()
        .find(|entry| entry.section == section)
        .is_some_and(|entry| entry.allows(role))
}

/// Menu entries the role may see, in table order
pub fn visible_sections(role: Role) -> Vec<&'static NavEntry> {
    NAV_TABLE.iter().filter(|entry| entry.allows(role)).collect()
}

/// Decide where a navigation to `route` ends up for the current user.
pub fn guard(route: Route, user: Option<&User>) -> Navigation {
    match (route.section(), user) {
        // Signed-in users have no business on the auth pages
        (None, Some(_)) => Navigation::Redirect(DEFAULT_ROUTE),
        (None, None) => Navigation::Allow(route),
        (Some(_), None) => Navigation::Redirect(Route::Login),
        (Some(section), Some(user)) if can_access(user.role, section) => Navigation::Allow(route),
        (Some(_), Some(_)) => Navigation::Redirect(DEFAULT_ROUTE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> User {
        User {
            id: 1,
            name: "Test".to_string(),
            email: "test@sga.ma".to_string(),
            role,
        }
    }

    #[test]
    fn test_employee_never_sees_employee_management() {
        let menu = visible_sections(Role::Employee);
        assert!(menu.iter().all(|e| e.section != Section::Employees));
        assert!(menu.iter().any(|e| e.section == Section::Clients));

        let employee = user(Role::Employee);
        for route in [Route::Employees, Route::Employee(3)] {
            assert_eq!(
                guard(route, Some(&employee)),
                Navigation::Redirect(Route::Dashboard)
            );
        }
    }

    #[test]
    fn test_admin_sees_everything() {
        assert_eq!(visible_sections(Role::Admin).len(), NAV_TABLE.len());
        let admin = user(Role::Admin);
        assert_eq!(
            guard(Route::Employee(3), Some(&admin)),
            Navigation::Allow(Route::Employee(3))
        );
    }

    #[test]
    fn test_anonymous_goes_to_login() {
        assert_eq!(guard(Route::Clients, None), Navigation::Redirect(Route::Login));
        assert_eq!(guard(Route::Clients, None).target(), Route::Login);
        assert_eq!(guard(Route::Login, None), Navigation::Allow(Route::Login));
        assert_eq!(guard(Route::Register, None), Navigation::Allow(Route::Register));
    }

    #[test]
    fn test_signed_in_user_skips_login_page() {
        let employee = user(Role::Employee);
        assert_eq!(
            guard(Route::Login, Some(&employee)),
            Navigation::Redirect(Route::Dashboard)
        );
    }

    #[test]
    fn test_route_paths() {
        assert_eq!("/clients/42".parse::<Route>().unwrap(), Route::Client(42));
        assert_eq!("/abonnements/7?tab=history".parse::<Route>().unwrap(), Route::Subscription(7));
        assert_eq!("/".parse::<Route>().unwrap(), Route::Dashboard);
        assert!("/clients/abc".parse::<Route>().is_err());
        assert!("/nowhere".parse::<Route>().is_err());

        for route in [Route::Client(42), Route::ActivityLogs, Route::Trash, Route::Login] {
            assert_eq!(route.to_string().parse::<Route>().unwrap(), route);
        }
    }
}
