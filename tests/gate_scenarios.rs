use mivet_gate::{
    access::{can_edit_clients, init_role_ui, wire_logout, Denial, Gate, PageContext, ProtectedView, RESTRICTED_NOTICE},
    auth::Credentials,
    backend::MemoryDirectory,
    config::GateConfig,
    error::AuthError,
    markup::{Element, PageMarkup, Selector},
    navigation::{Location, RecordingNavigator},
    storage::{FileStorage, MemoryStorage, SessionStorage},
    Page, Role, Session,
};

const KEY: &str = "veterinaryUser";

fn stored_session(role: &str) -> MemoryStorage {
    let raw = serde_json::json!({
        "id": 21,
        "displayName": "Marta",
        "email": "marta@clinica.mx",
        "roleId": 2,
        "roleName": role,
    });
    MemoryStorage::with_entry(KEY, &raw.to_string())
}

// --- Views built through the gate ------------------------------------------

#[derive(Debug)]
struct AccountsView {
    ctx: PageContext,
}

impl ProtectedView for AccountsView {
    const PAGE: Page = Page::Accounts;
    fn build(ctx: PageContext) -> Self {
        AccountsView { ctx }
    }
}

#[derive(Debug)]
struct PetDetailView {
    pet_id: Option<i64>,
    read_only_clients: bool,
}

impl ProtectedView for PetDetailView {
    const PAGE: Page = Page::PetDetail;
    fn build(ctx: PageContext) -> Self {
        PetDetailView {
            pet_id: ctx.query_param("id").and_then(|id| id.parse().ok()),
            read_only_clients: !can_edit_clients(ctx.session()),
        }
    }
}

// --- requireLogin scenarios -------------------------------------------------

#[test]
fn test_vet_reaches_page_shared_with_admins() {
    let gate = Gate::new(stored_session("Veterinario"), RecordingNavigator::new());
    let before = gate.current_user().unwrap();
    let session = gate.require_login(&["Administrador", "Veterinario"]).unwrap();
    assert_eq!(session, before);
    assert_eq!(gate.navigator().redirect_count(), 0);
}

#[test]
fn test_receptionist_refused_from_admin_page() {
    let gate = Gate::new(stored_session("Recepcionista"), RecordingNavigator::new());
    let denial = gate.require_login(&["Administrador"]).unwrap_err();
    assert_eq!(denial.notice(), Some(RESTRICTED_NOTICE));
    assert_eq!(gate.navigator().visits(), vec![Location::new(Page::Login)]);
}

#[test]
fn test_anonymous_redirect_is_silent() {
    let gate = Gate::new(MemoryStorage::new(), RecordingNavigator::new());
    let denial = gate.require_login(&["Administrador", "Recepcionista", "Veterinario"]).unwrap_err();
    assert_eq!(denial, Denial::NoSession);
    assert_eq!(denial.notice(), None);
    assert_eq!(gate.navigator().visits(), vec![Location::new(Page::Login)]);
}

#[test]
fn test_malformed_storage_is_anonymous_not_authorized() {
    let gate = Gate::new(MemoryStorage::with_entry(KEY, "{\"roleName\":\"Administrador\"}"), RecordingNavigator::new());
    assert_eq!(gate.require_login(&["Administrador"]), Err(Denial::NoSession));
    assert_eq!(gate.navigator().redirect_count(), 1);
}

#[test]
fn test_page_role_table() {
    for role in Role::ALL {
        for page in Page::ALL.into_iter().filter(|p| !p.is_public()) {
            let gate = Gate::new(stored_session(role.label()), RecordingNavigator::new());
            let result = gate.require_page(page);
            let role_ok = page.allowed_roles().contains(&role);
            let cap_ok = page.required_capability().map_or(true, |need| gate_session_can(role, need));
            assert_eq!(result.is_ok(), role_ok && cap_ok, "{role} on {page}");
            assert_eq!(gate.navigator().redirect_count(), usize::from(result.is_err()));
        }
    }
}

fn gate_session_can(role: Role, need: u32) -> bool {
    mivet_gate::rights::sufficient(mivet_gate::rights::granted(Some(role)), need)
}

// --- Mandatory factory ------------------------------------------------------

#[test]
fn test_factory_builds_view_only_when_admitted() {
    let gate = Gate::new(stored_session("Administrador"), RecordingNavigator::new());
    let view: AccountsView = gate.enter().unwrap();
    assert_eq!(view.ctx.session().id, 21);
    assert_eq!(view.ctx.location().page, Page::Accounts);

    let gate = Gate::new(stored_session("Veterinario"), RecordingNavigator::new());
    let refused = gate.enter::<AccountsView>().unwrap_err();
    assert!(matches!(refused, Denial::RoleNotPermitted { .. }));
}

#[test]
fn test_factory_carries_query_and_pins_page() {
    let gate = Gate::new(stored_session("Veterinario"), RecordingNavigator::new());
    // The location names another page; the view's own page is the one checked.
    let href = Location::new(Page::Accounts).with("id", 42).href();
    let view: PetDetailView = gate.enter_with(Location::parse(&href).unwrap()).unwrap();
    assert_eq!(view.pet_id, Some(42));
    assert!(view.read_only_clients);
    assert_eq!(gate.navigator().redirect_count(), 0);
}

// --- Role UI and logout -----------------------------------------------------

fn sidebar() -> PageMarkup {
    PageMarkup::new(vec![
        Element::new().with_id("who").with_attr("data-user-indicator", ""),
        Element::new().with_id("nav-cuentas").with_attr("data-roles", "Administrador"),
        Element::new().with_id("nav-citas").with_attr("data-roles", "Administrador,Recepcionista"),
        Element::new().with_id("nav-mis-citas").with_attr("data-roles", "Veterinario"),
        Element::new().with_id("linkMascotas").with_href("mascotas.html").with_text("Mascotas"),
        Element::new().with_id("salir").with_class("btn-logout"),
        Element::new().with_id("salir-movil").with_class("btn-logout"),
    ])
}

#[test]
fn test_full_page_lifecycle() {
    let gate = Gate::new(stored_session("Veterinario"), RecordingNavigator::new());
    let session = gate.require_page(Page::MyAppointments).unwrap();

    let mut page = sidebar();
    init_role_ui(&session, &mut page);
    let wired = wire_logout(&mut page, &gate.config().logout_selector).unwrap();
    assert_eq!(wired, 2);

    assert_eq!(page.by_id("who").unwrap().text, "Veterinario | marta@clinica.mx");
    assert!(page.by_id("nav-cuentas").unwrap().hidden);
    assert!(page.by_id("nav-citas").unwrap().hidden);
    assert!(!page.by_id("nav-mis-citas").unwrap().hidden);
    assert_eq!(page.by_id("linkMascotas").unwrap().href.as_deref(), Some("mis_mascotas.html"));

    for action in page.click(&Selector::Id("salir-movil".into())) {
        gate.perform(action).unwrap();
    }
    assert_eq!(gate.current_user(), None);
    assert_eq!(gate.navigator().last(), Some(Location::new(Page::Login)));

    // Next page load finds nobody.
    assert_eq!(gate.require_page(Page::MyAppointments), Err(Denial::NoSession));
}

// --- Login glue -------------------------------------------------------------

fn directory(gate: &Gate<impl SessionStorage, RecordingNavigator>) -> MemoryDirectory {
    let admin = gate.hash_password("admin-pw").unwrap();
    let recep = gate.hash_password("recep-pw").unwrap();
    let reply = serde_json::json!({
        "data": [
            {"id": 1, "nombre": "Dir", "correo": "dir@clinica.mx", "rol_id": 1,
             "roles": {"nombre": "Administrador"}, "cuenta": [{"password_hash": admin}]},
            {"id": 2, "nombre": "Rec", "correo": "rec@clinica.mx", "rol_id": 3,
             "roles": {"nombre": "Recepcionista"}, "cuenta": {"password_hash": recep}},
        ],
        "error": null
    });
    MemoryDirectory::from_reply(&reply.to_string()).unwrap()
}

fn fast_config() -> GateConfig {
    GateConfig { bcrypt_cost: 4, ..GateConfig::default() }
}

#[test]
fn test_login_persists_session_and_lands_by_role() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::open(dir.path()).unwrap();
    let gate = Gate::with_config(storage, RecordingNavigator::new(), fast_config());
    let users = directory(&gate);

    let session = gate.login(&users, &Credentials::new(" REC@clinica.mx ", "recep-pw")).unwrap();
    assert_eq!(session.role(), Some(Role::Receptionist));
    assert_eq!(gate.navigator().last(), Some(Location::new(Page::ReceptionPanel)));

    // A fresh gate over the same directory sees the session.
    let reopened = Gate::new(FileStorage::open(dir.path()).unwrap(), RecordingNavigator::new());
    assert_eq!(reopened.current_user(), Some(session));
    assert!(reopened.require_page(Page::Services).is_ok());
}

#[test]
fn test_failed_login_leaves_no_session() {
    let gate = Gate::with_config(MemoryStorage::new(), RecordingNavigator::new(), fast_config());
    let users = directory(&gate);

    assert!(matches!(
        gate.login(&users, &Credentials::new("dir@clinica.mx", "wrong")),
        Err(AuthError::WrongPassword)
    ));
    assert!(matches!(
        gate.login(&users, &Credentials::new("ghost@clinica.mx", "x")),
        Err(AuthError::UnknownUser)
    ));
    assert_eq!(gate.current_user(), None);
    assert_eq!(gate.navigator().redirect_count(), 0);

    let failing = MemoryDirectory::failing("service unavailable");
    let err = gate.login(&failing, &Credentials::new("dir@clinica.mx", "admin-pw")).unwrap_err();
    assert_eq!(err.to_string(), "User directory error: service unavailable");
}

#[test]
fn test_admin_lands_on_index_and_session_json_is_camel_case() {
    let storage = MemoryStorage::new();
    let gate = Gate::with_config(&storage, RecordingNavigator::new(), fast_config());
    let users = directory(&gate);
    gate.login(&users, &Credentials::new("dir@clinica.mx", "admin-pw")).unwrap();
    assert_eq!(gate.navigator().last(), Some(Location::new(Page::Index)));

    let raw = storage.get(KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["roleName"], "Administrador");
    assert_eq!(value["email"], "dir@clinica.mx");
    assert_eq!(Session::from_json(&raw).unwrap().id, 1);
}
