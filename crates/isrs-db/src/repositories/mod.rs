// All repository functions are generic over `E: Executor<'e, Database = Postgres>`
// so they accept both a `&PgPool` (direct query) and a `&mut Transaction` (atomic operations).

pub mod card;
pub mod deck;
pub mod preferences;
pub mod progress;
pub mod session;
pub mod sharing;
