//! Page renderers. Each returns one screen of the back office as text.

use std::fmt::Write as _;

use chrono::NaiveDate;

use crate::config::UiConfig;
use crate::domain::display::{
    avatar_color, bar, distribution_shares, format_amount, format_change, initials, percent_change,
};
use crate::domain::navigation::NavEntry;
use crate::domain::subscription::{days_remaining, effective_status, is_editable, is_expiring};
use crate::models::{
    ActivityLog, Client, DashboardSnapshot, Employee, PageMeta, Paginated, Subscription,
    TrashResource, TrashedRecord, User,
};
use crate::session::SessionState;
use crate::ui::table::{col, truncate, Table};

fn value_or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("-")
}

fn header(out: &mut String, title: &str) {
    let _ = writeln!(out);
    let _ = writeln!(out, "=== {} ===", title);
    let _ = writeln!(out);
}

fn page_footer(out: &mut String, meta: PageMeta) {
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Page {} of {} ({} total)",
        meta.current_page,
        meta.last_page.max(1),
        meta.total
    );
    if meta.has_previous() {
        let _ = writeln!(out, "Previous: --page {}", meta.current_page - 1);
    }
    if meta.has_next() {
        let _ = writeln!(out, "Next:     --page {}", meta.current_page + 1);
    }
    let _ = writeln!(out);
}

pub fn menu(user: &User, entries: &[&NavEntry]) -> String {
    let mut out = String::new();
    header(&mut out, &format!("{} ({})", user.name, user.role));
    for entry in entries {
        let _ = writeln!(out, "  {:<16} {}", entry.label, entry.route);
    }
    let _ = writeln!(out);
    out
}

pub fn profile(user: Option<&User>, state: &SessionState, api_url: &str) -> String {
    let mut out = String::new();
    match user {
        Some(user) => {
            header(&mut out, "Profile");
            let _ = writeln!(out, "Name:      {} [{}]", user.name, initials(&user.name));
            let _ = writeln!(out, "Email:     {}", user.email);
            let _ = writeln!(out, "Role:      {}", user.role);
        }
        None => {
            let _ = writeln!(out);
            let _ = writeln!(out, "Not signed in.");
        }
    }
    let _ = writeln!(out, "Theme:     {:?}", state.theme);
    let _ = writeln!(out, "Language:  {}", state.language.code());
    let _ = writeln!(out, "Backend:   {}", api_url);
    let _ = writeln!(out);
    out
}

pub fn clients(rows: &[Client], meta: PageMeta) -> String {
    let mut out = String::new();
    if rows.is_empty() {
        let _ = writeln!(out, "No clients found.");
        return out;
    }
    let mut table = Table::new(vec![
        col("ID", 6),
        col("", 2),
        col("NAME", 24),
        col("EMAIL", 26),
        col("PHONE", 14),
        col("EMPLOYEE", 18),
    ]);
    for client in rows {
        table.row(vec![
            client.id.to_string(),
            initials(&client.name),
            client.name.clone(),
            value_or_dash(client.email.as_deref()).to_string(),
            value_or_dash(client.phone.as_deref()).to_string(),
            client
                .employee
                .as_ref()
                .map(|e| e.name.clone())
                .unwrap_or_else(|| "-".to_string()),
        ]);
    }
    let _ = writeln!(out);
    out.push_str(&table.render());
    page_footer(&mut out, meta);
    out
}

pub fn client(client: &Client, today: NaiveDate, ui: &UiConfig) -> String {
    let mut out = String::new();
    header(&mut out, &format!("Client: {}", client.name));
    let _ = writeln!(
        out,
        "Avatar:    {} ({})",
        initials(&client.name),
        avatar_color(&client.name)
    );
    let _ = writeln!(out, "ID:        {}", client.id);
    let _ = writeln!(out, "Email:     {}", value_or_dash(client.email.as_deref()));
    let _ = writeln!(out, "Phone:     {}", value_or_dash(client.phone.as_deref()));
    let _ = writeln!(out, "Address:   {}", value_or_dash(client.address.as_deref()));
    let _ = writeln!(
        out,
        "Employee:  {}",
        client.employee.as_ref().map(|e| e.name.as_str()).unwrap_or("-")
    );
    if let Some(created) = client.created_at {
        let _ = writeln!(out, "Created:   {}", created.format("%Y-%m-%d"));
    }

    let _ = writeln!(out);
    if client.subscriptions.is_empty() {
        let _ = writeln!(out, "No subscriptions.");
    } else {
        let _ = writeln!(out, "Subscriptions:");
        subscription_rows(&mut out, &client.subscriptions, today, ui);
    }
    let _ = writeln!(out);
    out
}

fn subscription_rows(out: &mut String, subscriptions: &[Subscription], today: NaiveDate, ui: &UiConfig) {
    let mut table = Table::new(vec![
        col("ID", 6),
        col("CLIENT", 22),
        col("OFFER", 10),
        col("PRICE", 14),
        col("STATUS", 10),
        col("START", 10),
        col("END", 10),
        col("", 10),
    ]);
    for sub in subscriptions {
        let status = effective_status(sub.status, sub.end_date, today);
        let flag = if is_expiring(sub.status, sub.end_date, today, ui.expiring_within_days) {
            format!("{}d left", days_remaining(sub.end_date, today))
        } else {
            String::new()
        };
        table.row(vec![
            sub.id.to_string(),
            sub.client_name().to_string(),
            sub.offer_type.to_string(),
            format_amount(sub.price, &ui.currency),
            status.to_string(),
            sub.start_date.to_string(),
            sub.end_date.to_string(),
            flag,
        ]);
    }
    out.push_str(&table.render());
}

pub fn subscriptions(rows: &[Subscription], meta: PageMeta, today: NaiveDate, ui: &UiConfig) -> String {
    let mut out = String::new();
    if rows.is_empty() {
        let _ = writeln!(out, "No subscriptions found.");
        return out;
    }
    let _ = writeln!(out);
    subscription_rows(&mut out, rows, today, ui);
    page_footer(&mut out, meta);
    out
}

pub fn subscription(sub: &Subscription, today: NaiveDate, ui: &UiConfig) -> String {
    let mut out = String::new();
    let status = effective_status(sub.status, sub.end_date, today);
    header(&mut out, &format!("Subscription #{}", sub.id));
    let _ = writeln!(out, "Client:    {} (#{})", sub.client_name(), sub.client_id);
    let _ = writeln!(out, "Employee:  {}", sub.employee_name());
    let _ = writeln!(out, "Offer:     {}", sub.offer_type);
    let _ = writeln!(out, "Price:     {}", format_amount(sub.price, &ui.currency));
    if status != sub.status {
        let _ = writeln!(out, "Status:    {} (recorded as {})", status, sub.status);
    } else {
        let _ = writeln!(out, "Status:    {}", status);
    }
    let _ = writeln!(out, "Period:    {} -> {}", sub.start_date, sub.end_date);

    let remaining = days_remaining(sub.end_date, today);
    if remaining >= 0 {
        let _ = writeln!(out, "Remaining: {} day(s)", remaining);
    } else {
        let _ = writeln!(out, "Ended:     {} day(s) ago", -remaining);
    }
    if !is_editable(sub.status) {
        let _ = writeln!(out);
        let _ = writeln!(out, "Cancelled subscriptions are read-only; they can only be deleted.");
    }
    let _ = writeln!(out);
    out
}

pub fn employees(rows: &[Employee], meta: PageMeta) -> String {
    let mut out = String::new();
    if rows.is_empty() {
        let _ = writeln!(out, "No employees found.");
        return out;
    }
    let mut table = Table::new(vec![
        col("ID", 6),
        col("", 2),
        col("NAME", 24),
        col("EMAIL", 28),
        col("ROLE", 9),
        col("CLIENTS", 8),
    ]);
    for employee in rows {
        table.row(vec![
            employee.id.to_string(),
            initials(&employee.name),
            employee.name.clone(),
            employee.email.clone(),
            employee.role.to_string(),
            employee.clients_count.to_string(),
        ]);
    }
    let _ = writeln!(out);
    out.push_str(&table.render());
    page_footer(&mut out, meta);
    out
}

pub fn employee(employee: &Employee) -> String {
    let mut out = String::new();
    header(&mut out, &format!("Employee: {}", employee.name));
    let _ = writeln!(
        out,
        "Avatar:        {} ({})",
        initials(&employee.name),
        avatar_color(&employee.name)
    );
    let _ = writeln!(out, "ID:            {}", employee.id);
    let _ = writeln!(out, "Email:         {}", employee.email);
    let _ = writeln!(out, "Phone:         {}", value_or_dash(employee.phone.as_deref()));
    let _ = writeln!(out, "Role:          {}", employee.role);
    let _ = writeln!(out, "Clients:       {}", employee.clients_count);
    let _ = writeln!(out, "Subscriptions: {}", employee.subscriptions_count);
    let _ = writeln!(out);
    out
}

pub fn dashboard(snapshot: &DashboardSnapshot, today: NaiveDate, ui: &UiConfig) -> String {
    let mut out = String::new();
    let financial = &snapshot.financial;
    let clients = &snapshot.clients;

    header(&mut out, "Dashboard");
    let _ = writeln!(out, "Revenue:");
    let _ = writeln!(out, "  Total:        {}", format_amount(financial.total_revenue, &ui.currency));
    let _ = writeln!(
        out,
        "  This period:  {} ({})",
        format_amount(financial.period_revenue, &ui.currency),
        format_change(percent_change(
            financial.period_revenue,
            financial.previous_period_revenue
        ))
    );
    let _ = writeln!(out, "  Payments:     {}", financial.payments_count);
    let _ = writeln!(out);
    let _ = writeln!(out, "Clients:");
    let _ = writeln!(out, "  Total:        {}", clients.total_clients);
    let _ = writeln!(
        out,
        "  New:          {} ({})",
        clients.new_clients,
        format_change(percent_change(
            clients.new_clients as f64,
            clients.previous_new_clients as f64
        ))
    );
    let _ = writeln!(out, "  Active subs:  {}", clients.active_subscriptions);

    if !snapshot.revenue_history.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Revenue history:");
        let max = snapshot
            .revenue_history
            .iter()
            .map(|p| p.revenue)
            .fold(0.0, f64::max);
        for point in &snapshot.revenue_history {
            let _ = writeln!(
        out,
                "  {:<10} {:>16}  {}",
                point.label,
                format_amount(point.revenue, &ui.currency),
                bar(point.revenue, max, 30)
            );
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Subscriptions by offer:");
    for (offer, count, share) in distribution_shares(&snapshot.subscription_distribution) {
        let _ = writeln!(out, "  {:<11} {:>5}  {:>5.1}%", offer.to_string(), count, share);
    }

    if !snapshot.leaderboard.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Team leaderboard:");
        let mut ranked: Vec<_> = snapshot.leaderboard.iter().collect();
        ranked.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
        for (rank, entry) in ranked.iter().enumerate() {
            let _ = writeln!(
        out,
                "  {}. {:<22} {:>16}  {} sub(s)",
                rank + 1,
                truncate(&entry.name, 22),
                format_amount(entry.revenue, &ui.currency),
                entry.subscriptions_count
            );
        }
    }

    if !snapshot.expiring.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Expiring soon:");
        for item in &snapshot.expiring {
            let left = days_remaining(item.end_date, today);
            let _ = writeln!(
        out,
                "  #{:<6} {:<22} {:<10} {} ({})",
                item.id,
                truncate(&item.client_name, 22),
                item.offer_type.to_string(),
                item.end_date,
                if left >= 0 {
                    format!("{}d left", left)
                } else {
                    "ended".to_string()
                }
            );
        }
    }
    let _ = writeln!(out);
    out
}

pub fn activity(page: &Paginated<ActivityLog>) -> String {
    let mut out = String::new();
    if page.data.is_empty() {
        let _ = writeln!(out, "No activity recorded.");
        return out;
    }
    let _ = writeln!(out);
    for log in &page.data {
        let _ = writeln!(
        out,
            "{}  {:<18} {:<8} {}{}",
            log.created_at.format("%Y-%m-%d %H:%M"),
            truncate(log.actor_name(), 18),
            log.action.as_str(),
            log.subject_label(),
            log.subject_id.map(|id| format!(" #{}", id)).unwrap_or_default()
        );
        for change in log.changes.changes() {
            let show = |v: Option<&serde_json::Value>| match v {
                None | Some(serde_json::Value::Null) => "-".to_string(),
                Some(serde_json::Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
            };
            let _ = writeln!(
        out,
                "    {:<14} {} -> {}",
                change.field,
                truncate(&show(change.before), 30),
                truncate(&show(change.after), 30)
            );
        }
    }
    page_footer(&mut out, page.meta());
    out
}

pub fn trash(resource: TrashResource, rows: &[TrashedRecord], meta: PageMeta) -> String {
    let mut out = String::new();
    if rows.is_empty() {
        let _ = writeln!(out, "The {} recycle bin is empty.", resource);
        return out;
    }
    let mut table = Table::new(vec![col("ID", 6), col("NAME", 30), col("DELETED", 16)]);
    for record in rows {
        table.row(vec![
            record.id.to_string(),
            value_or_dash(record.name.as_deref()).to_string(),
            record.deleted_at.format("%Y-%m-%d %H:%M").to_string(),
        ]);
    }
    let _ = writeln!(out);
    out.push_str(&table.render());
    page_footer(&mut out, meta);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClientRef, OfferType, SubscriptionStatus};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn active_until(id: u64, end: NaiveDate) -> Subscription {
        Subscription {
            id,
            client_id: 4,
            client: Some(ClientRef {
                id: 4,
                name: "Karim".to_string(),
            }),
            employee_id: None,
            employee: None,
            offer_type: OfferType::Monthly,
            price: 300.0,
            status: SubscriptionStatus::Active,
            start_date: date(2024, 5, 9),
            end_date: end,
            created_at: None,
        }
    }

    fn row<'a>(rendered: &'a str, id: &str) -> &'a str {
        rendered
            .lines()
            .find(|line| line.starts_with(id))
            .unwrap()
    }

    #[test]
    fn test_list_shows_overlay_and_expiring_flag() {
        let today = date(2024, 6, 10);
        let rows = vec![active_until(1, date(2024, 6, 9)), active_until(2, date(2024, 6, 13))];
        let meta = PageMeta {
            current_page: 1,
            last_page: 1,
            total: 2,
        };

        let rendered = subscriptions(&rows, meta, today, &UiConfig::default());
        let lapsed = row(&rendered, "1 ");
        assert!(lapsed.contains("Expired"));
        assert!(!lapsed.contains("Active"));
        assert!(!lapsed.contains("left"));
        let expiring = row(&rendered, "2 ");
        assert!(expiring.contains("Active"));
        assert!(expiring.ends_with("3d left"));
        assert!(rendered.contains("Page 1 of 1 (2 total)"));
        assert!(!rendered.contains("--page"));

        let meta = PageMeta {
            current_page: 2,
            last_page: 3,
            total: 25,
        };
        let rendered = subscriptions(&rows, meta, today, &UiConfig::default());
        assert!(rendered.contains("Previous: --page 1"));
        assert!(rendered.contains("Next:     --page 3"));
    }

    #[test]
    fn test_detail_keeps_recorded_status_visible() {
        let today = date(2024, 6, 10);
        let rendered = subscription(&active_until(1, date(2024, 6, 9)), today, &UiConfig::default());
        assert!(rendered.contains("Status:    Expired (recorded as Active)"));
        assert!(rendered.contains("Ended:     1 day(s) ago"));
    }

    #[test]
    fn test_empty_pages_and_signed_out_profile() {
        let today = date(2024, 6, 10);
        let rendered = subscriptions(&[], PageMeta::default(), today, &UiConfig::default());
        assert_eq!(rendered, "No subscriptions found.\n");

        let rendered = profile(None, &SessionState::default(), "http://localhost:8000/api");
        assert!(rendered.contains("Not signed in."));
        assert!(rendered.contains("Backend:   http://localhost:8000/api"));
    }
}
