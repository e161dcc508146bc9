use std::{sync::Arc, time::Duration};

use anyhow::{Context as _, Result, anyhow, bail};
use client::RestClient;
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use models::{
    Entity, Resource,
    campaign::Campaign,
    category::Category,
    coupon::Coupon,
    customer::Customer,
    envelope::decode_entity,
    inventory::InventoryItem,
    order::Order,
    payment::Payment,
    product::Product,
    review::Review,
    role::{Permission, Role},
    staff::StaffMember,
    tenant::Tenant,
};
use services::services::{
    list_view::{ListState, ListView, MutationOutcome},
    moderation::{ModerationDecision, ModerationForm, ReviewModerator},
    notification::LogNotifier,
    query::{QueryClient, QueryKey},
    table::{TableView, Tabular},
};
use tracing::debug;

use crate::{
    cli::{Cli, Command, ListArgs},
    config::{FileConfig, client_config},
    render,
};

pub struct Context {
    query: QueryClient,
    notifier: Arc<LogNotifier>,
    page_size: Option<u32>,
}

/// Run `$body` with `$t` bound to the entity type behind `$resource`.
macro_rules! with_entity {
    ($resource:expr, $t:ident => $body:expr) => {
        match $resource {
            Resource::Products => { type $t = Product; $body }
            Resource::Categories => { type $t = Category; $body }
            Resource::Inventory => { type $t = InventoryItem; $body }
            Resource::Orders => { type $t = Order; $body }
            Resource::Campaigns => { type $t = Campaign; $body }
            Resource::Coupons => { type $t = Coupon; $body }
            Resource::Reviews => { type $t = Review; $body }
            Resource::Roles => { type $t = Role; $body }
            Resource::Permissions => { type $t = Permission; $body }
            Resource::Staff => { type $t = StaffMember; $body }
            Resource::Tenants => { type $t = Tenant; $body }
            Resource::Customers => { type $t = Customer; $body }
            Resource::Payments => { type $t = Payment; $body }
        }
    };
}

pub async fn run(cli: Cli) -> Result<()> {
    let file = FileConfig::load(cli.config.as_deref())?;
    let client = RestClient::new(client_config(&cli, &file)?)?;
    debug!(base_url = %client.base_url(), "client ready");

    let ctx = Context {
        query: QueryClient::new(Arc::new(client)),
        notifier: Arc::new(LogNotifier),
        page_size: file.page_size,
    };

    match cli.command {
        Command::List(args) => with_entity!(args.resource, T => list::<T>(&ctx, &args).await),
        Command::Show { resource, id } => with_entity!(resource, T => show::<T>(&ctx, &id).await),
        Command::Delete { resource, id, yes } => {
            with_entity!(resource, T => delete::<T>(&ctx, &id, yes).await)
        }
        Command::Moderate { id, reject, notes } => moderate(&ctx, &id, reject, notes).await,
    }
}

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

async fn fetch<T: Entity>(ctx: &Context, id: &str) -> Result<T> {
    let resource = T::RESOURCE;
    let pb = spinner(format!("Loading {} {id}", resource.noun().to_lowercase()));
    let body = ctx.query.read(QueryKey::detail(resource, id)).await;
    pb.finish_and_clear();

    let body = body.map_err(|e| anyhow!(e.user_message()))?;
    decode_entity::<T>(resource, &body).with_context(|| format!("decoding {resource} {id}"))
}

async fn list<T: Entity + Tabular>(ctx: &Context, args: &ListArgs) -> Result<()> {
    let mut view: ListView<T> = ListView::new(ctx.query.clone(), ctx.notifier.clone());
    if let Some(size) = args.limit.or(ctx.page_size) {
        view = view.with_page_size(size);
    }
    if let Some(search) = &args.search {
        view.set_search(search.clone());
        view.submit_search();
    }
    for (key, value) in &args.filters {
        view.set_filter(key.clone(), Some(value.clone()));
    }
    view.set_page(args.page.saturating_sub(1));

    let pb = spinner(format!("Loading {}", T::RESOURCE.label()));
    let state = view.load().await;
    pb.finish_and_clear();

    let page = match state {
        ListState::Loaded(page) => page,
        ListState::Failed { message } => bail!(message),
    };

    if args.json {
        let body = ctx
            .query
            .cached(QueryKey::list(T::RESOURCE, view.params()))
            .await
            .map(|b| (*b).clone())
            .unwrap_or_default();
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    let table = TableView::from_page(&page);
    print!("{}", render::table(&table));
    println!("{}", render::pager(&page.pagination, page.rows.len()));
    Ok(())
}

async fn show<T: Entity + Tabular>(ctx: &Context, id: &str) -> Result<()> {
    let entity: T = fetch(ctx, id).await?;
    let headers = T::headers();
    let label_width = headers.iter().map(|h| h.len()).max().unwrap_or(0);

    println!("{:label_width$}  {}", "ID", entity.id());
    for (header, cell) in headers.iter().zip(entity.cells()) {
        println!("{header:label_width$}  {cell}");
    }
    Ok(())
}

async fn delete<T: Entity>(ctx: &Context, id: &str, yes: bool) -> Result<()> {
    let resource = T::RESOURCE;
    let entity: T = fetch(ctx, id).await?;
    let mut view: ListView<T> = ListView::new(ctx.query.clone(), ctx.notifier.clone());
    let name = entity.display_name();
    view.request_delete(entity)?;

    let confirmed = yes
        || Confirm::new()
            .with_prompt(format!(
                "Delete {} \"{name}\"? This cannot be undone.",
                resource.noun().to_lowercase()
            ))
            .default(false)
            .interact()?;
    if !confirmed {
        view.cancel()?;
        println!("Cancelled");
        return Ok(());
    }

    match view.confirm().await? {
        MutationOutcome::Succeeded { message, .. } => {
            println!("{message}");
            Ok(())
        }
        MutationOutcome::Failed { message, .. } => bail!(message),
    }
}

async fn moderate(ctx: &Context, id: &str, reject: bool, notes: String) -> Result<()> {
    let review: Review = fetch(ctx, id).await?;
    let decision = if reject {
        ModerationDecision::Rejected
    } else {
        ModerationDecision::Approved
    };

    let moderator = ReviewModerator::new(ctx.query.clone(), ctx.notifier.clone());
    let updated = moderator
        .moderate(&review, &ModerationForm::new(decision, notes))
        .await?;
    let status = updated.map(|r| r.status).unwrap_or(decision.into());
    println!("Review {id} is now {status}");
    Ok(())
}
