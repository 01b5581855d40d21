pub mod error;
pub mod guard;
pub mod jwt;
pub mod middleware;
pub mod permissions;
pub mod queries;
pub mod resolver;
pub mod roles;
pub mod session;

pub use error::AuthError;
pub use guard::{
    Denial, GateQuery, GuardConfig, GuardDecision, NavRoute, RequireMode, RouteGuard,
    app_routes, route_guard, visible_routes,
};
pub use jwt::{AuthClaims, create_jwt, verify_jwt};
pub use middleware::{AuthState, AuthUser, require_permission};
pub use permissions::{Permission, PermissionSet, parse_permissions};
pub use resolver::PermissionResolver;
pub use roles::{BackendRole, RoleDescriptor, RoleDisplay, RoleRegistry};
pub use session::{Session, SessionSource, SessionUser};
