//! Record builders shared by the integration tests

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use recmerge_core::{Contact, Order, Product};

pub fn day(d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap()
}

pub fn contact(id: &str, name: &str, email: &str, phone: &str) -> Contact {
    Contact {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        address: String::new(),
        city: String::new(),
        state: String::new(),
        zip: String::new(),
        notes: None,
        created_at: day(1),
        updated_at: day(1),
    }
}

pub fn order(id: &str, contact_name: &str, total: &str, order_date: &str) -> Order {
    Order {
        id: id.to_string(),
        contact_id: format!("contact-{contact_name}"),
        contact_name: contact_name.to_string(),
        total: total.to_string(),
        order_date: order_date.to_string(),
        status: String::new(),
        created_at: day(1),
        updated_at: day(1),
    }
}

pub fn product(id: &str, name: &str, sku: &str, price: &str) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        description: String::new(),
        price: price.to_string(),
        sku: sku.to_string(),
        is_active: true,
        created_at: day(1),
        updated_at: day(1),
    }
}
