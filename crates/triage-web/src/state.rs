use triage_auth::GuardConfig;

pub struct AppState {
    pub guard: GuardConfig,
    pub jwt_secret: String,
}
