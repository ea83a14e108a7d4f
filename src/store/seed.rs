//! Initial site content loaded at startup.
//!
//! The original site shipped its catalog and settings as in-process data;
//! this keeps that behavior, just behind the repository layer.

use super::{new_id, now_rfc3339, Stores};
use crate::models::{AdminUser, Article, Page, PortfolioCard, Setting};

pub fn populate(stores: &Stores) {
    let now = now_rfc3339();

    for (title, slug, category, excerpt) in [
        (
            "Аренда автобетононасоса: как выбрать",
            "kak-vybrat-avtobetononasos",
            "guides",
            "Стрела 32–62 м, производительность и подача смеси — на что смотреть.",
        ),
        (
            "Автобетононасосы в Московской области",
            "avtobetononasosy-moskovskaya-oblast",
            "regions",
            "Работаем по всей Московской области, подача в день обращения.",
        ),
        (
            "Новое поступление: SANY 62 м",
            "novoe-postuplenie-sany-62",
            "news",
            "В парке появился автобетононасос SANY с длиной стрелы 62 метра.",
        ),
    ] {
        stores.articles.insert(Article {
            id: new_id(),
            title: title.to_string(),
            slug: slug.to_string(),
            excerpt: Some(excerpt.to_string()),
            content: String::new(),
            category: category.to_string(),
            published: true,
            created_at: now.clone(),
            updated_at: now.clone(),
        });
    }

    for (slug, title, region) in [
        ("/", "Автобетононасосы — продажа и аренда", None),
        ("/moscow", "Автобетононасосы в Москве", Some("moscow")),
        ("/spb", "Автобетононасосы в Санкт-Петербурге", Some("spb")),
    ] {
        stores.pages.insert(Page {
            id: new_id(),
            slug: slug.to_string(),
            title: title.to_string(),
            meta_description: None,
            content: String::new(),
            status: "published".to_string(),
            region: region.map(str::to_string),
            created_at: now.clone(),
            updated_at: now.clone(),
        });
    }

    for (i, (title, category)) in [
        ("ЖК «Северный парк», подача бетона на 18 этаж", "residential"),
        ("Фундамент логистического центра, 1200 м³", "industrial"),
        ("Опоры путепровода, трасса М-11", "infrastructure"),
    ]
    .into_iter()
    .enumerate()
    {
        stores.portfolio.insert(PortfolioCard {
            id: new_id(),
            title: title.to_string(),
            description: None,
            image_url: None,
            category: category.to_string(),
            region: None,
            sort_order: i as i32,
            published: true,
            created_at: now.clone(),
            updated_at: now.clone(),
        });
    }

    for (key, value) in [
        ("site_phone", serde_json::json!("+7 (495) 000-00-00")),
        ("site_email", serde_json::json!("info@betonpump.example")),
        ("work_hours", serde_json::json!("Пн–Вс 8:00–22:00")),
        ("show_portfolio", serde_json::json!(true)),
    ] {
        stores.settings.insert(Setting {
            id: new_id(),
            key: key.to_string(),
            value,
            updated_at: now.clone(),
            created_at: now.clone(),
        });
    }

    stores.users.insert(AdminUser {
        id: new_id(),
        name: "Администратор".to_string(),
        email: "admin@betonpump.example".to_string(),
        role: "admin".to_string(),
        active: true,
        created_at: now.clone(),
        updated_at: now,
    });

    tracing::info!(
        articles = stores.articles.len(),
        pages = stores.pages.len(),
        portfolio = stores.portfolio.len(),
        settings = stores.settings.len(),
        "Seed data loaded"
    );
}
