//! Placeholder datasets
//!
//! Fixed sample rows for the dashboard. IDs are stable across runs; with
//! conflict-ignoring inserts an edited row here is skipped, never updated,
//! unless the table was dropped first.

use acme_types::{Customer, CustomerId, InvoiceStatus, Revenue, SeedInvoice, SeedUser, UserId};
use chrono::NaiveDate;
use uuid::{uuid, Uuid};

use acme_types::InvoiceStatus::{Paid, Pending};

const fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("invalid placeholder date"),
    }
}

const USERS: [(Uuid, &str, &str, &str); 1] = [(
    uuid!("410544b2-4001-4271-9855-fec4b6a6442a"),
    "User",
    "user@nextmail.com",
    "123456",
)];

const CUSTOMERS: [(Uuid, &str, &str, &str); 6] = [
    (
        uuid!("d6e15727-9fe1-4961-8c5b-ea44a9bd81aa"),
        "Evil Rabbit",
        "evil@rabbit.com",
        "/customers/evil-rabbit.png",
    ),
    (
        uuid!("3958dc9e-712f-4377-85e9-fec4b6a6442a"),
        "Delba de Oliveira",
        "delba@oliveira.com",
        "/customers/delba-de-oliveira.png",
    ),
    (
        uuid!("3958dc9e-742f-4377-85e9-fec4b6a6442a"),
        "Lee Robinson",
        "lee@robinson.com",
        "/customers/lee-robinson.png",
    ),
    (
        uuid!("76d65c26-f784-44a2-ac19-586678f7c2f2"),
        "Michael Novotny",
        "michael@novotny.com",
        "/customers/michael-novotny.png",
    ),
    (
        uuid!("cc27c14a-0acf-4f4a-a6c9-d45682c144b9"),
        "Amy Burns",
        "amy@burns.com",
        "/customers/amy-burns.png",
    ),
    (
        uuid!("13d07535-c59e-4157-a011-f8d2ef4e0cbb"),
        "Balazs Orban",
        "balazs@orban.com",
        "/customers/balazs-orban.png",
    ),
];

// Amounts are already in minor units.
const INVOICES: [(Uuid, i32, InvoiceStatus, NaiveDate); 13] = [
    (CUSTOMERS[0].0, 15795, Pending, date(2022, 12, 6)),
    (CUSTOMERS[1].0, 20348, Pending, date(2022, 11, 14)),
    (CUSTOMERS[4].0, 3040, Paid, date(2022, 10, 29)),
    (CUSTOMERS[3].0, 44800, Paid, date(2023, 9, 10)),
    (CUSTOMERS[5].0, 34577, Pending, date(2023, 8, 5)),
    (CUSTOMERS[2].0, 54246, Pending, date(2023, 7, 16)),
    (CUSTOMERS[0].0, 666, Pending, date(2023, 6, 27)),
    (CUSTOMERS[3].0, 32545, Paid, date(2023, 6, 9)),
    (CUSTOMERS[4].0, 1250, Paid, date(2023, 6, 17)),
    (CUSTOMERS[5].0, 8546, Paid, date(2023, 6, 7)),
    (CUSTOMERS[1].0, 500, Paid, date(2023, 8, 19)),
    (CUSTOMERS[5].0, 8945, Paid, date(2023, 6, 3)),
    (CUSTOMERS[2].0, 1000, Paid, date(2022, 6, 5)),
];

const REVENUE: [(&str, i32); 12] = [
    ("Jan", 2000),
    ("Feb", 1800),
    ("Mar", 2200),
    ("Apr", 2500),
    ("May", 2300),
    ("Jun", 3200),
    ("Jul", 3500),
    ("Aug", 3700),
    ("Sep", 2500),
    ("Oct", 2800),
    ("Nov", 3000),
    ("Dec", 4800),
];

/// The four datasets the seed runner inserts
#[derive(Debug, Clone, Default)]
pub struct SampleData {
    pub users: Vec<SeedUser>,
    pub customers: Vec<Customer>,
    pub invoices: Vec<SeedInvoice>,
    pub revenue: Vec<Revenue>,
}

impl SampleData {
    /// The built-in dashboard sample data
    pub fn placeholder() -> Self {
        Self {
            users: USERS
                .iter()
                .map(|&(id, name, email, password)| SeedUser {
                    id: UserId(id),
                    name: name.to_string(),
                    email: email.to_string(),
                    password: password.to_string(),
                })
                .collect(),
            customers: CUSTOMERS
                .iter()
                .map(|&(id, name, email, image_url)| Customer {
                    id: CustomerId(id),
                    name: name.to_string(),
                    email: email.to_string(),
                    image_url: image_url.to_string(),
                })
                .collect(),
            invoices: INVOICES
                .iter()
                .map(|&(customer_id, amount, status, date)| SeedInvoice {
                    customer_id,
                    amount,
                    status,
                    date,
                })
                .collect(),
            revenue: REVENUE
                .iter()
                .map(|&(month, revenue)| Revenue::new(month, revenue))
                .collect(),
        }
    }

    /// Total number of rows across all datasets
    pub fn row_count(&self) -> usize {
        self.users.len() + self.customers.len() + self.invoices.len() + self.revenue.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_placeholder_sizes() {
        let data = SampleData::placeholder();
        assert_eq!(data.users.len(), 1);
        assert_eq!(data.customers.len(), 6);
        assert_eq!(data.invoices.len(), 13);
        assert_eq!(data.revenue.len(), 12);
        assert_eq!(data.row_count(), 32);
    }

    #[test]
    fn test_every_invoice_references_a_customer() {
        let data = SampleData::placeholder();
        let customers: HashSet<_> = data.customers.iter().map(|c| c.id.0).collect();
        assert!(data
            .invoices
            .iter()
            .all(|inv| customers.contains(&inv.customer_id)));
    }

    #[test]
    fn test_revenue_months_fit_column_and_are_unique() {
        let data = SampleData::placeholder();
        let months: HashSet<_> = data.revenue.iter().map(|r| r.month.as_str()).collect();
        assert_eq!(months.len(), data.revenue.len());
        assert!(data.revenue.iter().all(|r| r.month.len() <= 4));
    }

    #[test]
    fn test_user_emails_are_unique() {
        let data = SampleData::placeholder();
        let emails: HashSet<_> = data.users.iter().map(|u| u.email.as_str()).collect();
        assert_eq!(emails.len(), data.users.len());
    }
}
