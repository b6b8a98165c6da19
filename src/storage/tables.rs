use redb::TableDefinition;

/// Session record: fixed key -> SessionRecord (msgpack)
pub const SESSION: TableDefinition<&str, &[u8]> = TableDefinition::new("session");

/// The single key the session record lives under
pub const SESSION_KEY: &str = "current";
