use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use async_stream::stream;
use futures::StreamExt;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info};

use super::views;
use super::{
    ClientFields, ClientsCommands, Cli, Commands, ConfigCommands, DashboardArgs,
    EmployeesCommands, SettingsCommands, SubscriptionsCommands, TrashCommands,
};
use crate::api::{ApiError, Download};
use crate::config::Config;
use crate::domain::subscription::{is_editable, is_renewable};
use crate::domain::validation::{validate_client, validate_employee};
use crate::domain::{visible_sections, AfterRemoval, Navigation, Route, SubscriptionForm};
use crate::models::{
    ActivityFilter, CancelRequest, Client, ClientFilter, ClientInput, DashboardFilter,
    EmployeeInput, RecordId, RegisterRequest, RenewRequest, Subscription, SubscriptionFilter,
    SubscriptionInput, SubscriptionStatus, TrashResource,
};
use crate::search::{debounced, normalize_query};
use crate::store::{Clients, Employees, ListStore, Subscriptions, Trash};
use crate::ui::{Notice, StdinConfirm};
use crate::AppState;

/// Page a command stands in for; `None` for commands outside the guard
fn route_for(command: &Commands) -> Option<Route> {
    match command {
        Commands::Login { .. }
        | Commands::Register { .. }
        | Commands::Logout
        | Commands::Menu
        | Commands::Open { .. }
        | Commands::Settings(_)
        | Commands::Config(_) => None,
        Commands::Whoami => Some(Route::Profile),
        Commands::Dashboard(_) => Some(Route::Dashboard),
        Commands::Clients(ClientsCommands::Show { id }) => Some(Route::Client(*id)),
        Commands::Clients(_) => Some(Route::Clients),
        Commands::Employees(EmployeesCommands::Show { id }) => Some(Route::Employee(*id)),
        Commands::Employees(_) => Some(Route::Employees),
        Commands::Subscriptions(SubscriptionsCommands::Show { id }) => {
            Some(Route::Subscription(*id))
        }
        Commands::Subscriptions(_) => Some(Route::Subscriptions),
        Commands::Activity { .. } => Some(Route::ActivityLogs),
        Commands::Trash(_) => Some(Route::Trash),
    }
}

pub(super) async fn dispatch(cli: &Cli, app: &AppState) -> Result<()> {
    if let Some(route) = route_for(&cli.command) {
        if !enter(app, route).await? {
            return Ok(());
        }
    }

    match &cli.command {
        Commands::Login { email, password } => cmd_login(app, email, password.as_deref()).await,
        Commands::Register {
            name,
            email,
            password,
        } => cmd_register(app, name, email, password.as_deref()).await,
        Commands::Logout => cmd_logout(app).await,
        Commands::Whoami => {
            let user = app.refresh_profile().await?;
            print!(
                "{}",
                views::profile(Some(&user), &app.session.snapshot(), app.api.base_url())
            );
            Ok(())
        }
        Commands::Menu => cmd_menu(app).await,
        Commands::Open { path } => cmd_open(app, path).await,
        Commands::Dashboard(args) => cmd_dashboard(app, args).await,
        Commands::Clients(command) => clients(app, command).await,
        Commands::Employees(command) => employees(app, command).await,
        Commands::Subscriptions(command) => subscriptions(app, command).await,
        Commands::Activity {
            action,
            subject,
            page,
        } => {
            let filter = ActivityFilter {
                action: *action,
                subject_type: subject.clone(),
                page: *page,
            };
            let logs = app.api.list_activity_logs(&filter).await?;
            print!("{}", views::activity(&logs));
            Ok(())
        }
        Commands::Trash(command) => trash(app, command).await,
        Commands::Settings(command) => settings(app, command),
        Commands::Config(ConfigCommands::Check) => check_config(&cli.config),
    }
}

/// Run the navigation guard for a page. Signed-out users get an error; a
/// role without access is sent to the dashboard instead. Returns whether
/// the requested page may be shown.
async fn enter(app: &AppState, route: Route) -> Result<bool> {
    app.resolve_user().await?;
    match app.navigate(route) {
        Navigation::Allow(_) => Ok(true),
        Navigation::Redirect(Route::Login) => {
            bail!("Not signed in. Run 'sga login --email <email>' first.")
        }
        Navigation::Redirect(target) => {
            Notice::warning(format!(
                "{} is not available to your account; showing {} instead.",
                route, target
            ))
            .print();
            show(app, target).await?;
            Ok(false)
        }
    }
}

/// Render a page that the guard already allowed.
async fn show(app: &AppState, route: Route) -> Result<()> {
    match route {
        Route::Login => println!("Sign in with 'sga login --email <email>'."),
        Route::Register => println!("Create an account with 'sga register'."),
        Route::Dashboard => cmd_dashboard(app, &DashboardArgs::default()).await?,
        Route::Clients => clients_list(app, ClientFilter::default(), 1).await?,
        Route::Client(id) => {
            let client = app.api.get_client(id).await?;
            print!("{}", views::client(&client, app.today(), &app.config.ui));
        }
        Route::Subscriptions => {
            let page = app
                .api
                .list_subscriptions(&SubscriptionFilter {
                    page: 1,
                    ..Default::default()
                })
                .await?;
            print!("{}", views::subscriptions(&page.data, page.meta(), app.today(), &app.config.ui));
        }
        Route::Subscription(id) => {
            let sub = app.api.get_subscription(id).await?;
            print!("{}", views::subscription(&sub, app.today(), &app.config.ui));
        }
        Route::Employees => {
            let page = app.api.list_employees(None, 1).await?;
            print!("{}", views::employees(&page.data, page.meta()));
        }
        Route::Employee(id) => print!("{}", views::employee(&app.api.get_employee(id).await?)),
        Route::ActivityLogs => {
            let logs = app
                .api
                .list_activity_logs(&ActivityFilter {
                    page: 1,
                    ..Default::default()
                })
                .await?;
            print!("{}", views::activity(&logs));
        }
        Route::Trash => {
            for resource in [
                TrashResource::Clients,
                TrashResource::Subscriptions,
                TrashResource::Employees,
            ] {
                println!("--- {} ---", resource);
                let page = app.api.list_trash(resource, 1).await?;
                print!("{}", views::trash(resource, &page.data, page.meta()));
            }
        }
        Route::Profile | Route::Settings => {
            print!(
                "{}",
                views::profile(app.current_user().as_ref(), &app.session.snapshot(), app.api.base_url())
            )
        }
    }
    Ok(())
}

async fn prompt(label: &str) -> Result<String> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(label.as_bytes()).await?;
    stdout.flush().await?;

    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await
        .context("Failed to read from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

async fn password_or_prompt(password: Option<&str>) -> Result<String> {
    match password {
        Some(p) => Ok(p.to_string()),
        None => prompt("Password: ").await,
    }
}

async fn cmd_login(app: &AppState, email: &str, password: Option<&str>) -> Result<()> {
    let password = password_or_prompt(password).await?;
    let next = app.login(email, &password).await?;
    if let Some(user) = app.session.user() {
        Notice::success(format!("Signed in as {} ({})", user.name, user.role)).print();
    }
    show(app, next).await
}

async fn cmd_register(
    app: &AppState,
    name: &str,
    email: &str,
    password: Option<&str>,
) -> Result<()> {
    let password = password_or_prompt(password).await?;
    let confirmation = prompt("Confirm password: ").await?;
    let request = RegisterRequest {
        name: name.to_string(),
        email: email.to_string(),
        password,
        password_confirmation: confirmation,
    };
    let next = app.register(&request).await?;
    Notice::success(format!("Welcome, {}", name)).print();
    show(app, next).await
}

async fn cmd_logout(app: &AppState) -> Result<()> {
    if !app.session.is_authenticated() {
        Notice::info("Not signed in.").print();
        return Ok(());
    }
    app.logout().await?;
    Notice::success("Signed out").print();
    Ok(())
}

async fn cmd_menu(app: &AppState) -> Result<()> {
    app.resolve_user().await?;
    match app.current_user() {
        Some(user) => print!("{}", views::menu(&user, &visible_sections(user.role))),
        None => println!("Not signed in. Run 'sga login --email <email>'."),
    }
    Ok(())
}

async fn cmd_open(app: &AppState, path: &str) -> Result<()> {
    let route: Route = path.parse().map_err(anyhow::Error::msg)?;
    app.resolve_user().await?;
    match app.navigate(route) {
        Navigation::Allow(route) => show(app, route).await,
        Navigation::Redirect(target) => {
            if target != Route::Login {
                Notice::warning(format!("Redirected from {} to {}", route, target)).print();
            }
            show(app, target).await
        }
    }
}

async fn cmd_dashboard(app: &AppState, args: &DashboardArgs) -> Result<()> {
    let filter = DashboardFilter {
        employee_id: args.employee,
        year: args.year,
        month: args.month,
    };

    match &args.export {
        Some(path) => {
            let download = app.api.export_dashboard(&filter).await?;
            let target = if path.is_dir() {
                path.join(download.filename.as_deref().unwrap_or("dashboard.xlsx"))
            } else {
                path.clone()
            };
            save(&download, &target).await
        }
        None => {
            let snapshot = app.api.dashboard(&filter).await?;
            print!("{}", views::dashboard(&snapshot, app.today(), &app.config.ui));
            Ok(())
        }
    }
}

async fn save(download: &Download, path: &Path) -> Result<()> {
    tokio::fs::write(path, &download.bytes)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), bytes = download.bytes.len(), "File saved");
    Notice::success(format!(
        "Saved {} ({} bytes)",
        path.display(),
        download.bytes.len()
    ))
    .print();
    Ok(())
}

fn removal_notice(after: AfterRemoval, what: &str) {
    Notice::success(format!("{} moved to the recycle bin", what)).print();
    if let AfterRemoval::Refetch { page } = after {
        Notice::info(format!("That page is now empty; showing page {}", page)).print();
    }
}

// --- clients ---

async fn clients(app: &AppState, command: &ClientsCommands) -> Result<()> {
    match command {
        ClientsCommands::List {
            search,
            employee,
            page,
        } => {
            let filter = ClientFilter {
                search: search.as_deref().and_then(normalize_query),
                employee_id: *employee,
                page: *page,
            };
            clients_list(app, filter, *page).await
        }
        ClientsCommands::Show { id } => show(app, Route::Client(*id)).await,
        ClientsCommands::Create { name, fields } => {
            let input = ClientInput {
                name: name.trim().to_string(),
                ..client_input_from(fields, ClientInput::default())
            };
            validate_client(&input).map_err(ApiError::Validation)?;
            let mut store = ListStore::new(Clients(ClientFilter::default()));
            store.load(&app.api, 1).await?;
            let client = store.create(&app.api, &input).await?;
            Notice::success(format!("Client '{}' created", client.name)).print();
            print!("{}", views::client(&client, app.today(), &app.config.ui));
            print!("{}", views::clients(store.state().items(), store.state().meta()));
            Ok(())
        }
        ClientsCommands::Update {
            id,
            name,
            fields,
            page,
        } => {
            let current = app.api.get_client(*id).await?;
            let mut input = client_input_from(fields, existing_client_input(&current));
            if let Some(name) = name {
                input.name = name.trim().to_string();
            }
            validate_client(&input).map_err(ApiError::Validation)?;
            let mut store = ListStore::new(Clients(ClientFilter::default()));
            store.load(&app.api, *page).await?;
            let client = store.update(&app.api, *id, &input).await?;
            Notice::success(format!("Client '{}' updated", client.name)).print();
            print!("{}", views::clients(store.state().items(), store.state().meta()));
            Ok(())
        }
        ClientsCommands::Delete { id, page } => {
            let mut store = ListStore::new(Clients(ClientFilter::default()));
            store.load(&app.api, *page).await?;
            let after = store.delete(&app.api, *id).await?;
            removal_notice(after, &format!("Client #{}", id));
            print!("{}", views::clients(store.state().items(), store.state().meta()));
            Ok(())
        }
        ClientsCommands::Search { employee } => clients_search(app, *employee).await,
    }
}

async fn clients_list(app: &AppState, filter: ClientFilter, page: u32) -> Result<()> {
    let mut store = ListStore::new(Clients(filter));
    store.load(&app.api, page).await?;
    print!("{}", views::clients(store.state().items(), store.state().meta()));
    Ok(())
}

fn existing_client_input(client: &Client) -> ClientInput {
    ClientInput {
        name: client.name.clone(),
        email: client.email.clone(),
        phone: client.phone.clone(),
        address: client.address.clone(),
        employee_id: client
            .employee_id
            .or_else(|| client.employee.as_ref().map(|e| e.id)),
    }
}

/// Overlay the flags that were given on top of `base`.
fn client_input_from(fields: &ClientFields, base: ClientInput) -> ClientInput {
    ClientInput {
        email: fields.email.clone().or(base.email),
        phone: fields.phone.clone().or(base.phone),
        address: fields.address.clone().or(base.address),
        employee_id: fields.employee.or(base.employee_id),
        ..base
    }
}

/// Each stdin line is the search box content; only the value that stays
/// unchanged for the debounce period is sent.
async fn clients_search(app: &AppState, employee: Option<RecordId>) -> Result<()> {
    println!("Type a search and press Enter. An empty line clears it; Ctrl-D quits.");

    let lines = stream! {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            yield line;
        }
    };
    let mut queries = Box::pin(debounced(
        Box::pin(lines),
        app.config.ui.search_debounce(),
    ));

    while let Some(raw) = queries.next().await {
        let filter = ClientFilter {
            search: normalize_query(&raw),
            employee_id: employee,
            page: 1,
        };
        debug!(search = ?filter.search, "Searching clients");
        match app.api.list_clients(&filter).await {
            Ok(page) => print!("{}", views::clients(&page.data, page.meta())),
            Err(e) => {
                let stop = e.is_unauthorized();
                app.handle_error(&e).print();
                if stop {
                    break;
                }
            }
        }
    }
    Ok(())
}

// --- employees ---

async fn employees(app: &AppState, command: &EmployeesCommands) -> Result<()> {
    match command {
        EmployeesCommands::List { search, page } => {
            let mut store = ListStore::new(Employees {
                search: search.as_deref().and_then(normalize_query),
                transfer_to: None,
            });
            store.load(&app.api, *page).await?;
            print!("{}", views::employees(store.state().items(), store.state().meta()));
            Ok(())
        }
        EmployeesCommands::Show { id } => show(app, Route::Employee(*id)).await,
        EmployeesCommands::Create {
            name,
            email,
            phone,
            role,
            password,
        } => {
            let input = EmployeeInput {
                name: name.trim().to_string(),
                email: email.trim().to_string(),
                phone: phone.clone(),
                role: *role,
                password: Some(password.clone()),
            };
            validate_employee(&input, true).map_err(ApiError::Validation)?;
            let mut store = ListStore::new(Employees {
                search: None,
                transfer_to: None,
            });
            store.load(&app.api, 1).await?;
            let employee = store.create(&app.api, &input).await?;
            Notice::success(format!("Employee '{}' created", employee.name)).print();
            print!("{}", views::employee(&employee));
            print!("{}", views::employees(store.state().items(), store.state().meta()));
            Ok(())
        }
        EmployeesCommands::Update {
            id,
            name,
            email,
            phone,
            role,
            password,
            page,
        } => {
            let current = app.api.get_employee(*id).await?;
            let input = EmployeeInput {
                name: name.clone().unwrap_or(current.name),
                email: email.clone().unwrap_or(current.email),
                phone: phone.clone().or(current.phone),
                role: role.unwrap_or(current.role),
                password: password.clone(),
            };
            validate_employee(&input, false).map_err(ApiError::Validation)?;
            let mut store = ListStore::new(Employees {
                search: None,
                transfer_to: None,
            });
            store.load(&app.api, *page).await?;
            let employee = store.update(&app.api, *id, &input).await?;
            Notice::success(format!("Employee '{}' updated", employee.name)).print();
            print!("{}", views::employees(store.state().items(), store.state().meta()));
            Ok(())
        }
        EmployeesCommands::Delete {
            id,
            transfer_to,
            page,
        } => {
            let employee = app.api.get_employee(*id).await?;
            if let Some(warning) = employee.deletion_warning(*transfer_to) {
                Notice::warning(warning).print();
            }
            let mut store = ListStore::new(Employees {
                search: None,
                transfer_to: *transfer_to,
            });
            store.load(&app.api, *page).await?;
            let after = store.delete(&app.api, *id).await?;
            removal_notice(after, &format!("Employee '{}'", employee.name));
            print!("{}", views::employees(store.state().items(), store.state().meta()));
            Ok(())
        }
    }
}

// --- subscriptions ---

fn existing_subscription_input(sub: &Subscription) -> SubscriptionInput {
    SubscriptionInput {
        client_id: sub.client_id,
        employee_id: sub.employee_id,
        offer_type: sub.offer_type,
        price: sub.price,
        status: sub.status,
        start_date: sub.start_date,
        end_date: sub.end_date,
    }
}

async fn subscriptions(app: &AppState, command: &SubscriptionsCommands) -> Result<()> {
    let today = app.today();
    let ui = &app.config.ui;

    match command {
        SubscriptionsCommands::List {
            search,
            status,
            offer,
            employee,
            client,
            page,
        } => {
            let mut store = ListStore::new(Subscriptions(SubscriptionFilter {
                search: search.as_deref().and_then(normalize_query),
                status: *status,
                offer_type: *offer,
                employee_id: *employee,
                client_id: *client,
                page: *page,
            }));
            store.load(&app.api, *page).await?;
            print!("{}", views::subscriptions(store.state().items(), store.state().meta(), today, ui));
            Ok(())
        }
        SubscriptionsCommands::Show { id } => show(app, Route::Subscription(*id)).await,
        SubscriptionsCommands::Create {
            client,
            employee,
            offer,
            price,
            start,
            end,
            status,
        } => {
            let mut form = SubscriptionForm::new(start.unwrap_or(today), *offer);
            form.client_id = Some(*client);
            form.employee_id = *employee;
            form.price = Some(*price);
            form.status = *status;
            if let Some(end) = end {
                form.set_end_date(*end);
            }
            let input = form.to_input().map_err(ApiError::Validation)?;
            let mut store = ListStore::new(Subscriptions(SubscriptionFilter::default()));
            store.load(&app.api, 1).await?;
            let sub = store.create(&app.api, &input).await?;
            Notice::success(format!(
                "Subscription #{} created, ends {}",
                sub.id, sub.end_date
            ))
            .print();
            print!("{}", views::subscription(&sub, today, ui));
            print!("{}", views::subscriptions(store.state().items(), store.state().meta(), today, ui));
            Ok(())
        }
        SubscriptionsCommands::Update {
            id,
            offer,
            price,
            status,
            start,
            end,
            page,
        } => {
            let current = app.api.get_subscription(*id).await?;
            if !is_editable(current.status) {
                bail!(
                    "Subscription #{} is cancelled; it can only be deleted.",
                    current.id
                );
            }

            let mut form = SubscriptionForm::from_existing(&existing_subscription_input(&current));
            if let Some(start) = start {
                form.set_start_date(*start);
            }
            if let Some(offer) = offer {
                form.set_offer_type(*offer);
            }
            if let Some(end) = end {
                form.set_end_date(*end);
            }
            if let Some(price) = price {
                form.price = Some(*price);
            }
            if let Some(status) = status {
                form.status = *status;
            }
            let input = form.to_input().map_err(ApiError::Validation)?;
            let mut store = ListStore::new(Subscriptions(SubscriptionFilter::default()));
            store.load(&app.api, *page).await?;
            let sub = store.update(&app.api, *id, &input).await?;
            Notice::success(format!("Subscription #{} updated", sub.id)).print();
            print!("{}", views::subscription(&sub, today, ui));
            print!("{}", views::subscriptions(store.state().items(), store.state().meta(), today, ui));
            Ok(())
        }
        SubscriptionsCommands::Delete { id, page } => {
            let mut store = ListStore::new(Subscriptions(SubscriptionFilter::default()));
            store.load(&app.api, *page).await?;
            let after = store.delete(&app.api, *id).await?;
            removal_notice(after, &format!("Subscription #{}", id));
            print!("{}", views::subscriptions(store.state().items(), store.state().meta(), today, ui));
            Ok(())
        }
        SubscriptionsCommands::Renew {
            id,
            offer,
            amount,
            start,
            end,
        } => {
            let current = app.api.get_subscription(*id).await?;
            if !is_renewable(current.status) {
                bail!("Subscription #{} is cancelled and cannot be renewed.", current.id);
            }

            let mut form = SubscriptionForm::new(
                start.unwrap_or(current.end_date),
                offer.unwrap_or(current.offer_type),
            );
            if let Some(end) = end {
                form.set_end_date(*end);
            }
            form.validate_renewal(*amount).map_err(ApiError::Validation)?;

            let request = RenewRequest {
                offer_type: form.offer_type(),
                amount_paid: *amount,
                start_date: form.start_date(),
                end_date: form.end_date(),
            };
            let outcome = app.api.renew_subscription(*id, &request).await?;
            Notice::success(format!(
                "Subscription renewed until {}",
                outcome.subscription.end_date
            ))
            .print();
            if let Some(new_id) = outcome.redirect_to {
                Notice::info(format!("Now showing {}", Route::Subscription(new_id))).print();
            }
            print!("{}", views::subscription(&outcome.subscription, today, ui));
            Ok(())
        }
        SubscriptionsCommands::Cancel { id, end } => {
            let current = app.api.get_subscription(*id).await?;
            if current.status == SubscriptionStatus::Cancelled {
                Notice::info(format!("Subscription #{} is already cancelled", id)).print();
                return Ok(());
            }
            let sub = app
                .api
                .cancel_subscription(*id, &CancelRequest { end_date: *end })
                .await?;
            Notice::success(format!("Subscription #{} cancelled", sub.id)).print();
            print!("{}", views::subscription(&sub, today, ui));
            Ok(())
        }
        SubscriptionsCommands::Receipt { id, output } => {
            let download = app.api.download_receipt(*id).await?;
            let path = output.clone().unwrap_or_else(|| {
                PathBuf::from(
                    download
                        .filename
                        .clone()
                        .unwrap_or_else(|| format!("receipt-{}.pdf", id)),
                )
            });
            save(&download, &path).await
        }
    }
}

// --- recycle bin ---

async fn trash(app: &AppState, command: &TrashCommands) -> Result<()> {
    match command {
        TrashCommands::List { resource, page } => {
            let mut store = ListStore::new(Trash(*resource));
            store.load(&app.api, *page).await?;
            print!("{}", views::trash(*resource, store.state().items(), store.state().meta()));
            Ok(())
        }
        TrashCommands::Restore { resource, id } => {
            app.api.restore(*resource, *id).await?;
            Notice::success(format!("Restored {} #{}", resource, id)).print();
            Ok(())
        }
        TrashCommands::Purge { resource, id } => {
            if app.purge(&StdinConfirm, *resource, *id).await? {
                Notice::success(format!("Permanently deleted {} #{}", resource, id)).print();
            } else {
                Notice::info("Nothing was deleted").print();
            }
            Ok(())
        }
    }
}

// --- preferences ---

fn settings(app: &AppState, command: &SettingsCommands) -> Result<()> {
    match command {
        SettingsCommands::Show => {}
        SettingsCommands::Theme { theme } => {
            app.session.set_theme(*theme)?;
            Notice::success(format!("Theme set to {:?}", theme)).print();
        }
        SettingsCommands::Language { language } => {
            app.session.set_language(*language)?;
            Notice::success(format!("Language set to {}", language.code())).print();
        }
    }
    print!(
        "{}",
        views::profile(app.current_user().as_ref(), &app.session.snapshot(), app.api.base_url())
    );
    Ok(())
}

pub fn check_config(config_path: &Path) -> Result<()> {
    println!("Checking configuration file: {}", config_path.display());
    println!();

    if !config_path.exists() {
        println!(
            "[!!] Configuration file not found: {}",
            config_path.display()
        );
        println!();
        println!("Built-in defaults will be used.");
        return Ok(());
    }

    match Config::load(config_path) {
        Ok(config) => {
            println!("[OK] Configuration file is valid!");
            println!();
            println!("=== Configuration Summary ===");
            println!();
            println!("API:");
            println!("  Base URL:     {}", config.api.base_url);
            println!("  Timeout:      {}s", config.api.timeout_secs);
            println!();
            println!("Session:");
            println!("  State File:   {}", config.session.state_file.display());
            println!();
            println!("UI:");
            println!("  Debounce:     {}ms", config.ui.search_debounce_ms);
            println!("  Expiring:     {} day(s)", config.ui.expiring_within_days);
            println!("  Currency:     {}", config.ui.currency);
            println!();
            println!("Logging:");
            println!("  Level:        {}", config.logging.level);
            Ok(())
        }
        Err(e) => {
            println!("[!!] Configuration file is invalid!");
            println!();
            println!("Error: {:#}", e);
            Err(e)
        }
    }
}
