use serde::Serialize;

/// Plain-text greeting served at `/`.
pub const WELCOME_MESSAGE: &str = "Welcome to a user and group management REST API service!";

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

impl Health {
    pub fn ok() -> Self { Self { status: "ok" } }
}

/// Fixed acknowledgement body, e.g. `{"message":"updated"}`.
#[derive(Serialize, Debug)]
pub struct Message {
    pub message: &'static str,
}

impl Message {
    pub fn new(message: &'static str) -> Self { Self { message } }
    pub fn updated() -> Self { Self::new("updated") }
    pub fn deleted() -> Self { Self::new("deleted") }
}

/// Identifier returned by create endpoints, e.g. `{"id":1}`.
#[derive(Serialize, Debug)]
pub struct Created {
    pub id: i32,
}
