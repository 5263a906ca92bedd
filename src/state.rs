use crate::{
    db::{DbPool, OrmConn},
    jwt::JwtKeys,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub jwt: JwtKeys,
}
