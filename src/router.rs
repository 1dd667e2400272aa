use std::collections::{BTreeSet, HashMap};
use std::io::Read;

use astra::Request;
use chrono::Utc;
use rusqlite::Connection;
use tracing::{debug, info};
use url::form_urlencoded;

use crate::auth::gate::{AccessGate, GuardVerdict, LOGIN_PATH, NEUTRAL_PATH};
use crate::auth::login::{LoginConfig, LoginService, SignupForm};
use crate::auth::session::{
    clear_auth, update_stored_user, CachedSessionStore, Role, Session, SessionUser,
};
use crate::auth::token::generate_token_default;
use crate::catalog::CatalogSource;
use crate::db::hostels::{self, NewHostel};
use crate::db::session_store::SqliteSessionStore;
use crate::db::{favorites, notifications, reviews, users, Database};
use crate::domain::notification::{filter_notifications, KindFilter, NotificationCounts, NotificationFilter};
use crate::domain::review::NewReview;
use crate::domain::{apply_filters, sort_listings, FilterCriteria, SortOrder};
use crate::errors::ServerError;
use crate::responses::{
    clear_session_cookie, html_response, html_response_with_status, redirect_response,
    redirect_with_cookie, session_cookie, set_session_cookie, ResultResp,
};
use crate::templates::pages::{
    home_page, hostel_page, login_page, notifications_page, owner_dashboard_page, profile_page,
    search_page, signup_page, student_dashboard_page, wishlist_page, HostelVm, NotificationsVm,
    OwnerDashboardVm, ProfileVm, SearchVm, StudentDashboardVm, WishlistVm,
};

const FEATURED_COUNT: usize = 3;
const RECENT_NOTIFICATIONS: usize = 5;

pub struct App {
    pub db: Database,
    pub catalog: Box<dyn CatalogSource + Send + Sync>,
}

enum Access {
    Open,
    /// Login and signup: signed-in users are sent to their dashboard.
    PublicOnly,
    Protected(Option<Role>),
}

/// Decided on the same segments the dispatcher matches, so a doubled or
/// trailing slash cannot reach a handler under a weaker access level.
fn access_for(method: &str, segments: &[&str]) -> Access {
    match (method, segments) {
        ("GET", ["login"]) | ("GET", ["signup"]) => Access::PublicOnly,
        (_, ["student", ..]) => Access::Protected(Some(Role::Student)),
        (_, ["owner", ..]) => Access::Protected(Some(Role::Owner)),
        ("POST", ["hostels", _, "reviews"]) => Access::Protected(Some(Role::Student)),
        _ => Access::Open,
    }
}

/// Path segments with empty ones dropped: `//owner/hostels/` is `["owner", "hostels"]`.
fn path_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

struct Ctx {
    cookie: Option<String>,
    session: Option<Session>,
    now: i64,
}

impl Ctx {
    fn viewer(&self) -> Option<&SessionUser> {
        self.session
            .as_ref()
            .filter(|s| s.has_token())
            .and_then(|s| s.user.as_ref())
    }

    fn student(&self) -> Option<&SessionUser> {
        self.viewer()
            .filter(|u| u.role.as_deref() == Some(Role::Student.as_str()))
    }

    /// Behind a role guard the session always carries a user, but the
    /// stored document is not trusted to.
    fn require_user(&self) -> Result<&SessionUser, ServerError> {
        self.viewer()
            .ok_or_else(|| ServerError::Unauthorized("sign in to continue".into()))
    }
}

pub fn handle(req: Request, app: &App) -> ResultResp {
    let now = Utc::now().timestamp();
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    let query = req.uri().query().unwrap_or("").to_string();
    let cookie = session_cookie(&req);
    let segments = path_segments(&path);
    let target = format!("/{}", segments.join("/"));

    let (verdict, session) = app.db.with_conn(|conn| {
        let gate = AccessGate::new(CachedSessionStore::new(SqliteSessionStore::new(
            conn,
            cookie.as_deref(),
            now,
        )));
        let verdict = match access_for(&method, &segments) {
            Access::Open => GuardVerdict::allow(),
            Access::PublicOnly => gate.public_guard(&target),
            Access::Protected(role) => gate.guard(&target, role),
        };
        Ok((verdict, gate.session()))
    })?;

    if let Some(to) = verdict.redirect_to {
        return redirect_response(&to);
    }

    let ctx = Ctx {
        cookie,
        session,
        now,
    };
    match (method.as_str(), segments.as_slice()) {
        ("GET", []) => home(app, &ctx),
        ("GET", ["login"]) => html_response(login_page(None, "")),
        ("GET", ["signup"]) => html_response(signup_page(None)),

        ("POST", ["auth", "login"]) => login(app, &ctx, &read_form(req)?),
        ("POST", ["auth", "signup"]) => signup(app, &ctx, &read_form(req)?),
        ("POST", ["auth", "logout"]) => logout(app, &ctx),

        ("GET", ["hostels"]) => search(app, &ctx, &query),
        ("GET", ["hostels", id]) => hostel_detail(app, &ctx, parse_id(id)?),
        ("POST", ["hostels", id, "reviews"]) => {
            let id = parse_id(id)?;
            post_review(app, &ctx, id, &read_form(req)?)
        }

        ("GET", ["student", "dashboard"]) => student_dashboard(app, &ctx),
        ("GET", ["student", "wishlist"]) => wishlist(app, &ctx),
        ("POST", ["student", "wishlist", id]) => {
            let back = back_path(&req, "/student/wishlist");
            save_to_wishlist(app, &ctx, parse_id(id)?, &back)
        }
        ("POST", ["student", "wishlist", id, "remove"]) => {
            let back = back_path(&req, "/student/wishlist");
            remove_from_wishlist(app, &ctx, parse_id(id)?, &back)
        }

        ("GET", ["student", "notifications"]) => notifications_inbox(app, &ctx, &query),
        ("POST", ["student", "notifications", "read-all"]) => {
            let user = ctx.require_user()?;
            app.db
                .with_conn(|conn| notifications::mark_all_read(conn, user.id, ctx.now))?;
            redirect_response(&back_path(&req, "/student/notifications"))
        }
        ("POST", ["student", "notifications", "clear"]) => {
            let user = ctx.require_user()?;
            app.db
                .with_conn(|conn| notifications::clear_all(conn, user.id))?;
            redirect_response("/student/notifications")
        }
        ("POST", ["student", "notifications", id, "read"]) => {
            let (user, id) = (ctx.require_user()?, parse_id(id)?);
            app.db
                .with_conn(|conn| notifications::mark_read(conn, user.id, id, ctx.now))?;
            redirect_response(&back_path(&req, "/student/notifications"))
        }
        ("POST", ["student", "notifications", id, "delete"]) => {
            let (user, id) = (ctx.require_user()?, parse_id(id)?);
            app.db
                .with_conn(|conn| notifications::delete(conn, user.id, id))?;
            redirect_response(&back_path(&req, "/student/notifications"))
        }

        ("GET", [area @ ("student" | "owner"), "profile"]) => profile(app, &ctx, area, &query),
        ("POST", [area @ ("student" | "owner"), "profile"]) => {
            edit_profile(app, &ctx, area, &read_form(req)?)
        }
        ("POST", [area @ ("student" | "owner"), "profile", "password"]) => {
            change_password(app, &ctx, area, &read_form(req)?)
        }

        ("GET", ["owner", "dashboard"]) => owner_dashboard(app, &ctx),
        ("POST", ["owner", "hostels"]) => add_hostel(app, &ctx, &read_form(req)?),

        _ => Err(ServerError::NotFound),
    }
}

fn parse_id(raw: &str) -> Result<i64, ServerError> {
    raw.parse().map_err(|_| ServerError::NotFound)
}

type Form = Vec<(String, String)>;

fn read_form(req: Request) -> Result<Form, ServerError> {
    let mut body = Vec::new();
    req.into_body()
        .reader()
        .read_to_end(&mut body)
        .map_err(|e| ServerError::BadRequest(format!("unreadable request body: {e}")))?;
    Ok(form_urlencoded::parse(&body).into_owned().collect())
}

fn query_pairs(query: &str) -> Form {
    form_urlencoded::parse(query.as_bytes()).into_owned().collect()
}

fn str_pairs(pairs: &[(String, String)]) -> impl Iterator<Item = (&str, &str)> {
    pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
}

/// First value for `key`, or "" when absent.
fn field<'a>(form: &'a [(String, String)], key: &str) -> &'a str {
    form.iter()
        .find(|(k, _)| k == key)
        .map_or("", |(_, v)| v.as_str())
}

/// Path and query of the Referer, so form posts return to the page they came from.
/// Only the path is kept; the redirect never leaves this site.
fn back_path(req: &Request, fallback: &str) -> String {
    req.headers()
        .get("Referer")
        .and_then(|v| v.to_str().ok())
        .and_then(|r| url::Url::parse(r).ok())
        // `//host/...` would be read by the browser as another site.
        .filter(|u| u.path().starts_with('/') && !u.path().starts_with("//"))
        .map(|u| match u.query() {
            Some(q) => format!("{}?{q}", u.path()),
            None => u.path().to_string(),
        })
        .unwrap_or_else(|| fallback.to_string())
}

/// Rotate the browser's session key and store a fresh session for `user`.
/// Returns the new cookie key and the user's landing path.
fn open_session(
    conn: &Connection,
    ctx: &Ctx,
    user: &SessionUser,
) -> Result<(String, String), ServerError> {
    if ctx.cookie.is_some() {
        clear_auth(&mut SqliteSessionStore::new(conn, ctx.cookie.as_deref(), ctx.now))?;
    }

    let key = generate_token_default();
    let mut gate = AccessGate::new(SqliteSessionStore::new(conn, Some(key.as_str()), ctx.now));
    LoginService::start_session(gate.store_mut(), user)?;
    let landing = gate.role_based_landing_path(NEUTRAL_PATH).to_string();
    Ok((key, landing))
}

/// Reload the viewer's profile and rewrite the stored copy when it changed.
fn refresh_viewer(conn: &Connection, ctx: &Ctx, user: &SessionUser) -> Result<SessionUser, ServerError> {
    let Some(row) = users::find_user_by_email(conn, &user.email)? else {
        return Ok(user.clone());
    };
    let fresh = row.to_session_user();
    if fresh != *user {
        let mut store = SqliteSessionStore::new(conn, ctx.cookie.as_deref(), ctx.now);
        update_stored_user(&mut store, &fresh)?;
        debug!(user_id = fresh.id, "stored profile refreshed");
    }
    Ok(fresh)
}

fn home(app: &App, ctx: &Ctx) -> ResultResp {
    let mut featured = app.catalog.listings()?;
    sort_listings(&mut featured, SortOrder::Rating);
    featured.truncate(FEATURED_COUNT);
    html_response(home_page(ctx.viewer(), &featured))
}

// Bad credentials re-render the form; storage errors propagate.
fn login(app: &App, ctx: &Ctx, form: &Form) -> ResultResp {
    let email = field(form, "email");
    let password = field(form, "password");
    let svc = LoginService::new(LoginConfig::default());

    let outcome = app.db.with_conn(|conn| {
        match svc.authenticate(conn, email, password, ctx.now) {
            Ok(user) => open_session(conn, ctx, &user).map(Ok),
            Err(ServerError::Unauthorized(msg) | ServerError::BadRequest(msg)) => Ok(Err(msg)),
            Err(e) => Err(e),
        }
    })?;

    match outcome {
        Ok((key, landing)) => redirect_with_cookie(&landing, &set_session_cookie(&key)),
        Err(msg) => html_response_with_status(401, login_page(Some(&msg), email)),
    }
}

fn signup(app: &App, ctx: &Ctx, form: &Form) -> ResultResp {
    let role = match field(form, "role").parse::<Role>() {
        Ok(role) => role,
        Err(e) => return html_response_with_status(400, signup_page(Some(&e.to_string()))),
    };
    let signup = SignupForm {
        email: field(form, "email").to_string(),
        password: field(form, "password").to_string(),
        first_name: field(form, "first_name").to_string(),
        last_name: field(form, "last_name").to_string(),
        role,
    };
    let svc = LoginService::new(LoginConfig::default());

    let outcome = app.db.with_conn(|conn| match svc.signup(conn, &signup, ctx.now) {
        Ok(user) => open_session(conn, ctx, &user).map(Ok),
        Err(e @ (ServerError::BadRequest(_) | ServerError::Conflict(_))) => Ok(Err(e)),
        Err(e) => Err(e),
    })?;

    match outcome {
        Ok((key, landing)) => redirect_with_cookie(&landing, &set_session_cookie(&key)),
        Err(e) => {
            let msg = match &e {
                ServerError::BadRequest(m) | ServerError::Conflict(m) => m.clone(),
                other => other.to_string(),
            };
            html_response_with_status(e.status(), signup_page(Some(&msg)))
        }
    }
}

fn logout(app: &App, ctx: &Ctx) -> ResultResp {
    app.db.with_conn(|conn| {
        let mut store = SqliteSessionStore::new(conn, ctx.cookie.as_deref(), ctx.now);
        LoginService::end_session(&mut store)
    })?;
    redirect_with_cookie(LOGIN_PATH, &clear_session_cookie())
}

fn saved_ids(app: &App, ctx: &Ctx) -> Result<Option<BTreeSet<i64>>, ServerError> {
    let Some(user) = ctx.student() else {
        return Ok(None);
    };
    let saved = app
        .db
        .with_conn(|conn| favorites::favorites_for_user(conn, user.id))?;
    Ok(Some(saved.into_iter().map(|(id, _)| id).collect()))
}

fn search(app: &App, ctx: &Ctx, query: &str) -> ResultResp {
    let pairs = query_pairs(query);
    let criteria = FilterCriteria::from_pairs(str_pairs(&pairs));
    let sort = SortOrder::from_pairs(str_pairs(&pairs));

    let catalog = app.catalog.listings()?;
    let mut results = apply_filters(&catalog, &criteria);
    sort_listings(&mut results, sort);
    debug!(
        total = catalog.len(),
        matched = results.len(),
        sort = sort.as_param(),
        "search"
    );

    html_response(search_page(&SearchVm {
        viewer: ctx.viewer(),
        criteria,
        sort,
        results,
        catalog_size: catalog.len(),
        saved: saved_ids(app, ctx)?,
    }))
}

fn hostel_detail(app: &App, ctx: &Ctx, id: i64) -> ResultResp {
    let listing = app.catalog.find(id)?.ok_or(ServerError::NotFound)?;
    let reviews = app
        .db
        .with_conn(|conn| reviews::reviews_for_hostel(conn, id))?;
    let can_review = ctx
        .student()
        .map_or(false, |u| reviews.iter().all(|r| r.user_id != u.id));

    html_response(hostel_page(&HostelVm {
        viewer: ctx.viewer(),
        saved: saved_ids(app, ctx)?.map(|ids| ids.contains(&id)),
        listing,
        reviews,
        can_review,
    }))
}

fn post_review(app: &App, ctx: &Ctx, id: i64, form: &Form) -> ResultResp {
    let user = ctx.require_user()?;
    let listing = app.catalog.find(id)?.ok_or(ServerError::NotFound)?;
    let review = NewReview::parse(field(form, "rating"), field(form, "comment"))?;

    let review_id = app.db.with_conn(|conn| {
        reviews::add_review(conn, user.id, id, &listing.name, &review, ctx.now)
    })?;
    info!(review_id, hostel_id = id, user_id = user.id, "review posted");
    redirect_response(&format!("/hostels/{id}#reviews"))
}

fn student_dashboard(app: &App, ctx: &Ctx) -> ResultResp {
    let user = ctx.require_user()?;
    let (user, saved, unread, mut recent) = app.db.with_conn(|conn| {
        let user = refresh_viewer(conn, ctx, user)?;
        let saved = favorites::favorites_for_user(conn, user.id)?;
        let unread = notifications::unread_count(conn, user.id)?;
        let recent = notifications::list_for_user(conn, user.id)?;
        Ok((user, saved, unread, recent))
    })?;
    recent.truncate(RECENT_NOTIFICATIONS);

    let saved_ids: BTreeSet<i64> = saved.iter().map(|(id, _)| *id).collect();
    let mut recommended: Vec<_> = app
        .catalog
        .listings()?
        .into_iter()
        .filter(|l| !saved_ids.contains(&l.id))
        .collect();
    sort_listings(&mut recommended, SortOrder::Rating);
    recommended.truncate(FEATURED_COUNT);

    html_response(student_dashboard_page(&StudentDashboardVm {
        user: &user,
        saved_count: saved.len(),
        unread_count: unread,
        recent,
        recommended,
    }))
}

fn wishlist(app: &App, ctx: &Ctx) -> ResultResp {
    let user = ctx.require_user()?;
    let saved = app
        .db
        .with_conn(|conn| favorites::favorites_for_user(conn, user.id))?;

    let mut by_id: HashMap<i64, _> = app
        .catalog
        .listings()?
        .into_iter()
        .map(|l| (l.id, l))
        .collect();
    let entries: Vec<_> = saved
        .iter()
        .filter_map(|(id, saved_at)| by_id.remove(id).map(|l| (l, *saved_at)))
        .collect();

    html_response(wishlist_page(&WishlistVm {
        viewer: user,
        unavailable: saved.len() - entries.len(),
        entries,
    }))
}

fn save_to_wishlist(app: &App, ctx: &Ctx, id: i64, back: &str) -> ResultResp {
    let user = ctx.require_user()?;
    app.catalog.find(id)?.ok_or(ServerError::NotFound)?;
    app.db
        .with_conn(|conn| favorites::add_favorite(conn, user.id, id, ctx.now))?;
    redirect_response(back)
}

fn remove_from_wishlist(app: &App, ctx: &Ctx, id: i64, back: &str) -> ResultResp {
    let user = ctx.require_user()?;
    app.db
        .with_conn(|conn| favorites::remove_favorite(conn, user.id, id))?;
    redirect_response(back)
}

fn notifications_inbox(app: &App, ctx: &Ctx, query: &str) -> ResultResp {
    let user = ctx.require_user()?;
    let pairs = query_pairs(query);
    let filter = NotificationFilter {
        kind: KindFilter::parse(field(&pairs, "kind")),
        query: field(&pairs, "q").trim().to_string(),
    };

    let all = app
        .db
        .with_conn(|conn| notifications::list_for_user(conn, user.id))?;
    let items = filter_notifications(&all, &filter)
        .into_iter()
        .cloned()
        .collect();

    html_response(notifications_page(&NotificationsVm {
        viewer: user,
        counts: NotificationCounts::tally(&all),
        filter,
        items,
    }))
}

fn owner_dashboard(app: &App, ctx: &Ctx) -> ResultResp {
    let user = ctx.require_user()?;
    let (user, listings, stats) = app.db.with_conn(|conn| {
        let user = refresh_viewer(conn, ctx, user)?;
        let listings = hostels::owner_listings(conn, user.id)?;
        let stats = hostels::owner_stats(conn, user.id)?;
        Ok((user, listings, stats))
    })?;

    html_response(owner_dashboard_page(&OwnerDashboardVm {
        user: &user,
        listings,
        stats,
    }))
}

fn add_hostel(app: &App, ctx: &Ctx, form: &Form) -> ResultResp {
    let user = ctx.require_user()?;
    let hostel = NewHostel::from_form(
        field(form, "name"),
        field(form, "location"),
        field(form, "description"),
        field(form, "price"),
        field(form, "room_type"),
        field(form, "amenities"),
    )?;

    let hostel_id = app
        .db
        .with_conn(|conn| hostels::insert_hostel(conn, user.id, &hostel, ctx.now))?;
    info!(hostel_id, owner_id = user.id, "hostel listed");
    redirect_response("/owner/dashboard")
}

fn render_profile(
    user: &SessionUser,
    area: &str,
    notice: Option<&str>,
    error: Option<&str>,
    status: u16,
) -> ResultResp {
    let base = format!("/{area}/profile");
    html_response_with_status(
        status,
        profile_page(&ProfileVm {
            user,
            base: &base,
            notice,
            error,
        }),
    )
}

fn profile(app: &App, ctx: &Ctx, area: &str, query: &str) -> ResultResp {
    let user = ctx.require_user()?;
    let user = app.db.with_conn(|conn| refresh_viewer(conn, ctx, user))?;
    let pairs = query_pairs(query);
    let notice = match field(&pairs, "updated") {
        "profile" => Some("Profile saved."),
        "password" => Some("Password changed."),
        _ => None,
    };
    render_profile(&user, area, notice, None, 200)
}

// Invalid input re-renders the page; storage errors propagate.
fn edit_profile(app: &App, ctx: &Ctx, area: &str, form: &Form) -> ResultResp {
    let user = ctx.require_user()?;
    let svc = LoginService::new(LoginConfig::default());

    let outcome = app.db.with_conn(|conn| {
        match svc.update_profile(conn, user.id, field(form, "first_name"), field(form, "last_name")) {
            Ok(fresh) => {
                let mut store = SqliteSessionStore::new(conn, ctx.cookie.as_deref(), ctx.now);
                update_stored_user(&mut store, &fresh)?;
                Ok(Ok(()))
            }
            Err(ServerError::BadRequest(msg)) => Ok(Err(msg)),
            Err(e) => Err(e),
        }
    })?;

    match outcome {
        Ok(()) => redirect_response(&format!("/{area}/profile?updated=profile")),
        Err(msg) => render_profile(user, area, None, Some(&msg), 400),
    }
}

fn change_password(app: &App, ctx: &Ctx, area: &str, form: &Form) -> ResultResp {
    let user = ctx.require_user()?;
    let svc = LoginService::new(LoginConfig::default());

    let outcome = app.db.with_conn(|conn| {
        match svc.change_password(
            conn,
            user.id,
            field(form, "current_password"),
            field(form, "new_password"),
        ) {
            Ok(()) => Ok(Ok(())),
            Err(e @ (ServerError::Unauthorized(_) | ServerError::BadRequest(_))) => Ok(Err(e)),
            Err(e) => Err(e),
        }
    })?;

    match outcome {
        Ok(()) => redirect_response(&format!("/{area}/profile?updated=password")),
        Err(e) => {
            let msg = match &e {
                ServerError::Unauthorized(m) | ServerError::BadRequest(m) => m.clone(),
                other => other.to_string(),
            };
            render_profile(user, area, None, Some(&msg), e.status())
        }
    }
}
