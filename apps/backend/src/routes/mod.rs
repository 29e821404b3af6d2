//! Route table and wiring.
//!
//! [`ROUTES`] is the single place that decides which endpoints sit behind
//! the session gate. The router is built from it.

use actix_web::http::Method;
use actix_web::{guard, web, Route};

use tracing::debug;

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::middleware::session_gate::SessionGate;

pub mod auth;
pub mod books;
pub mod borrowed_books;
pub mod categories;
pub mod health;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Verb {
    pub fn method(self) -> Method {
        match self {
            Verb::Get => Method::GET,
            Verb::Post => Method::POST,
            Verb::Put => Method::PUT,
            Verb::Patch => Method::PATCH,
            Verb::Delete => Method::DELETE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// No token required.
    Public,
    /// Valid session token required.
    Session,
    /// Valid session token whose email must equal the `email` query parameter.
    SessionOwner,
}

impl Access {
    pub fn is_gated(self) -> bool {
        !matches!(self, Access::Public)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Root,
    Health,
    IssueSession,
    Logout,
    ListCategories,
    ListBooks,
    GetBook,
    ListBorrowed,
    AddBook,
    BorrowBook,
    DecrementQuantity,
    SetQuantity,
    ReplaceBook,
    ReturnBook,
}

impl Endpoint {
    fn route(self) -> Route {
        let route = web::route();
        match self {
            Endpoint::Root => route.to(health::root),
            Endpoint::Health => route.to(health::health),
            Endpoint::IssueSession => route.to(auth::issue_session),
            Endpoint::Logout => route.to(auth::logout),
            Endpoint::ListCategories => route.to(categories::list_categories),
            Endpoint::ListBooks => route.to(books::list_books),
            Endpoint::GetBook => route.to(books::get_book),
            Endpoint::ListBorrowed => route.to(borrowed_books::list_borrowed),
            Endpoint::AddBook => route.to(books::add_book),
            Endpoint::BorrowBook => route.to(borrowed_books::borrow_book),
            Endpoint::DecrementQuantity => route.to(books::decrement_quantity),
            Endpoint::SetQuantity => route.to(books::set_quantity),
            Endpoint::ReplaceBook => route.to(books::replace_book),
            Endpoint::ReturnBook => route.to(borrowed_books::return_book),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RouteDef {
    pub verb: Verb,
    pub path: &'static str,
    pub endpoint: Endpoint,
    pub access: Access,
}

const fn def(verb: Verb, path: &'static str, endpoint: Endpoint, access: Access) -> RouteDef {
    RouteDef {
        verb,
        path,
        endpoint,
        access,
    }
}

#[rustfmt::skip]
pub static ROUTES: [RouteDef; 14] = [
    def(Verb::Get,    "/",                          Endpoint::Root,              Access::Public),
    def(Verb::Get,    "/health",                    Endpoint::Health,            Access::Public),
    def(Verb::Post,   "/jwt",                       Endpoint::IssueSession,      Access::Public),
    def(Verb::Post,   "/logout",                    Endpoint::Logout,            Access::Public),
    def(Verb::Get,    "/books-category",            Endpoint::ListCategories,    Access::Public),
    def(Verb::Get,    "/books",                     Endpoint::ListBooks,         Access::Session),
    def(Verb::Get,    "/books/{id}",                Endpoint::GetBook,           Access::Public),
    def(Verb::Get,    "/user/borrowed-book",        Endpoint::ListBorrowed,      Access::SessionOwner),
    def(Verb::Post,   "/add-book",                  Endpoint::AddBook,           Access::Session),
    def(Verb::Post,   "/user/borrowed-book",        Endpoint::BorrowBook,        Access::Public),
    def(Verb::Patch,  "/books/{id}",                Endpoint::DecrementQuantity, Access::Public),
    def(Verb::Patch,  "/book/{name}",               Endpoint::SetQuantity,       Access::Public),
    def(Verb::Put,    "/books/{id}",                Endpoint::ReplaceBook,       Access::Session),
    def(Verb::Delete, "/user/borrowed-book/{name}", Endpoint::ReturnBook,        Access::Public),
];

/// Register every entry of [`ROUTES`], wrapping gated ones in [`SessionGate`].
///
/// Each entry becomes its own method-guarded resource, so entries sharing a
/// path can carry different access levels.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(query_config());

    for def in ROUTES.iter() {
        let resource = web::resource(def.path)
            .guard(guard::Method(def.verb.method()))
            .route(def.endpoint.route());

        if def.access.is_gated() {
            cfg.service(resource.wrap(SessionGate));
        } else {
            cfg.service(resource);
        }
    }
}

/// Query strings that fail to deserialize answer with the JSON error body.
fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        debug!(error = %err, "query string rejected");
        AppError::bad_request(ErrorCode::BadRequest, "Invalid query string").into()
    })
}
