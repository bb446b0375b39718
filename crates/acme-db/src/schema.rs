//! Table definitions
//!
//! The schema is rebuilt from scratch by the seed runner; there are no
//! migrations.

/// Extension providing `uuid_generate_v4()`
pub const UUID_EXTENSION_SQL: &str = r#"CREATE EXTENSION IF NOT EXISTS "uuid-ossp""#;

/// The four tables owned by this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Users,
    Customers,
    Invoices,
    Revenue,
}

impl Table {
    /// Dependents first, so cascading drops never trip over each other
    pub const DROP_ORDER: [Table; 4] = [Self::Invoices, Self::Customers, Self::Users, Self::Revenue];

    /// Customers before invoices (invoice -> customer reference)
    pub const SEED_ORDER: [Table; 4] = [Self::Users, Self::Customers, Self::Invoices, Self::Revenue];

    /// Table name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Customers => "customers",
            Self::Invoices => "invoices",
            Self::Revenue => "revenue",
        }
    }

    /// Whether the primary key is a generated UUID
    pub const fn uses_uuid_key(&self) -> bool {
        !matches!(self, Self::Revenue)
    }

    /// Conflict-ignoring seed insert: `id` for UUID-keyed tables,
    /// `month` for revenue
    pub const fn insert_sql(&self) -> &'static str {
        match self {
            Self::Users => {
                r#"
                INSERT INTO users (id, name, email, password)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (id) DO NOTHING
                "#
            }
            Self::Customers => {
                r#"
                INSERT INTO customers (id, name, email, image_url)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (id) DO NOTHING
                "#
            }
            Self::Invoices => {
                r#"
                INSERT INTO invoices (customer_id, amount, status, date)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (id) DO NOTHING
                "#
            }
            Self::Revenue => {
                r#"
                INSERT INTO revenue (month, revenue)
                VALUES ($1, $2)
                ON CONFLICT (month) DO NOTHING
                "#
            }
        }
    }

    pub const fn drop_sql(&self) -> &'static str {
        match self {
            Self::Users => "DROP TABLE IF EXISTS users CASCADE",
            Self::Customers => "DROP TABLE IF EXISTS customers CASCADE",
            Self::Invoices => "DROP TABLE IF EXISTS invoices CASCADE",
            Self::Revenue => "DROP TABLE IF EXISTS revenue CASCADE",
        }
    }

    pub const fn create_sql(&self) -> &'static str {
        match self {
            Self::Users => {
                r#"
                CREATE TABLE IF NOT EXISTS users (
                    id UUID DEFAULT uuid_generate_v4() PRIMARY KEY,
                    name VARCHAR(255) NOT NULL,
                    email TEXT NOT NULL UNIQUE,
                    password TEXT NOT NULL
                )
                "#
            }
            Self::Customers => {
                r#"
                CREATE TABLE IF NOT EXISTS customers (
                    id UUID DEFAULT uuid_generate_v4() PRIMARY KEY,
                    name VARCHAR(255) NOT NULL,
                    email VARCHAR(255) NOT NULL,
                    image_url VARCHAR(255) NOT NULL
                )
                "#
            }
            Self::Invoices => {
                r#"
                CREATE TABLE IF NOT EXISTS invoices (
                    id UUID DEFAULT uuid_generate_v4() PRIMARY KEY,
                    customer_id UUID NOT NULL,
                    amount INT NOT NULL,
                    status VARCHAR(255) NOT NULL,
                    date DATE NOT NULL
                )
                "#
            }
            Self::Revenue => {
                r#"
                CREATE TABLE IF NOT EXISTS revenue (
                    month VARCHAR(4) NOT NULL UNIQUE,
                    revenue INT NOT NULL
                )
                "#
            }
        }
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
