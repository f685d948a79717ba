//! # Console Front End
//!
//! A line-oriented stand-in for the dashboard screen. Each input line is
//! parsed into a [`ConsoleCommand`], dispatched to the command layer, and
//! rendered back as text.
//!
//! ## Commands
//! ```text
//! add <price> <qty> <product name>   record a sale          (sale form)
//! sales                              list recorded sales
//! dashboard                          KPIs, charts, goals    (main screen)
//! goal [monthly|annual]              goal simulator panel
//! target <monthly|annual> <amount>   set a goal target
//! whatif <monthly|annual> <amount>   simulate a target without saving it
//! reset [--yes]                      clear sales and restore targets
//! advise                             start an advisor request
//! insights                           wait for the advisor's answer
//! status                             advisor request state
//! cancel                             cancel the pending advisor request
//! help | quit
//! ```

use fluir_core::{GoalPeriod, GoalState, ProductCategory};
use tracing::debug;

use crate::commands::{advisor, goal, metrics, sale};
use crate::error::ApiError;
use crate::state::{AdvisorState, DashboardConfig, DashboardState};

pub const HELP_TEXT: &str = "\
Commands:
  add <price> <qty> <product name>   record a sale
  sales                              list recorded sales
  dashboard                          show metrics, charts and goals
  goal [monthly|annual]              show the goal simulator
  target <monthly|annual> <amount>   set a goal target
  whatif <monthly|annual> <amount>   simulate a target without saving it
  reset [--yes]                      clear all sales and restore default targets
  advise                             ask the advisor for insights (background)
  insights                           wait for the advisor's answer
  status                             show whether an advisor request is running
  cancel                             cancel the pending advisor request
  help                               show this text
  quit                               exit";

// =============================================================================
// Parsing
// =============================================================================

/// One parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    AddSale {
        unit_price: String,
        quantity: i64,
        product_name: String,
    },
    ListSales,
    Dashboard,
    Goal(GoalPeriod),
    SetTarget { period: GoalPeriod, amount: String },
    WhatIf { period: GoalPeriod, amount: String },
    Reset { confirmed: bool },
    Advise,
    Insights,
    Status,
    Cancel,
    Help,
    Quit,
}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<ConsoleCommand>, ApiError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "add" => parse_add(rest)?,
        "sales" => ConsoleCommand::ListSales,
        "dashboard" | "metrics" => ConsoleCommand::Dashboard,
        "goal" => {
            let period = if rest.is_empty() {
                GoalPeriod::default()
            } else {
                rest.parse()?
            };
            ConsoleCommand::Goal(period)
        }
        "target" => {
            let (period, amount) = parse_period_amount("target", rest)?;
            ConsoleCommand::SetTarget { period, amount }
        }
        "whatif" => {
            let (period, amount) = parse_period_amount("whatif", rest)?;
            ConsoleCommand::WhatIf { period, amount }
        }
        "reset" => ConsoleCommand::Reset {
            confirmed: matches!(rest, "--yes" | "-y"),
        },
        "advise" => ConsoleCommand::Advise,
        "insights" => ConsoleCommand::Insights,
        "status" => ConsoleCommand::Status,
        "cancel" => ConsoleCommand::Cancel,
        "help" | "?" => ConsoleCommand::Help,
        "quit" | "exit" => ConsoleCommand::Quit,
        _ => return Err(ApiError::unknown_command(word)),
    };

    Ok(Some(command))
}

fn parse_add(rest: &str) -> Result<ConsoleCommand, ApiError> {
    let usage = || ApiError::validation("Usage: add <price> <qty> <product name>");

    let mut parts = rest.splitn(3, char::is_whitespace);
    let unit_price = parts.next().filter(|s| !s.is_empty()).ok_or_else(usage)?;
    let quantity = parts
        .next()
        .ok_or_else(usage)?
        .parse::<i64>()
        .map_err(|_| ApiError::validation("quantity must be a whole number"))?;
    let product_name = parts.next().unwrap_or("").trim();

    Ok(ConsoleCommand::AddSale {
        unit_price: unit_price.to_string(),
        quantity,
        product_name: product_name.to_string(),
    })
}

fn parse_period_amount(command: &str, rest: &str) -> Result<(GoalPeriod, String), ApiError> {
    let usage = || ApiError::validation(format!("Usage: {} <monthly|annual> <amount>", command));
    let (period, amount) = rest.split_once(char::is_whitespace).ok_or_else(usage)?;
    Ok((period.parse()?, amount.trim().to_string()))
}

// =============================================================================
// Execution
// =============================================================================

/// Result of executing one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleOutput {
    Text(String),
    Quit,
}

/// The console: state handles plus rendering.
#[derive(Clone)]
pub struct Console {
    dashboard: DashboardState,
    advisor: AdvisorState,
    config: DashboardConfig,
}

impl Console {
    pub fn new(dashboard: DashboardState, advisor: AdvisorState, config: DashboardConfig) -> Self {
        Console {
            dashboard,
            advisor,
            config,
        }
    }

    /// Parses and executes one input line. Errors are rendered, never raised.
    pub async fn handle_line(&self, line: &str) -> Option<ConsoleOutput> {
        match parse_command(line) {
            Ok(None) => None,
            Ok(Some(command)) => Some(match self.execute(command).await {
                Ok(output) => output,
                Err(e) => ConsoleOutput::Text(format!("Error: {}", e.message)),
            }),
            Err(e) => Some(ConsoleOutput::Text(format!("Error: {}", e.message))),
        }
    }

    pub async fn execute(&self, command: ConsoleCommand) -> Result<ConsoleOutput, ApiError> {
        debug!(?command, "Executing console command");
        let now = self.config.now();

        let text = match command {
            ConsoleCommand::AddSale {
                unit_price,
                quantity,
                product_name,
            } => {
                let sale = sale::add_sale(
                    &self.dashboard,
                    sale::AddSaleRequest {
                        product_name,
                        unit_price,
                        quantity,
                    },
                )?;
                format!(
                    "Recorded: {} x{} @ {} = {}",
                    sale.product_name(),
                    sale.quantity(),
                    self.config.format_currency(sale.unit_price()),
                    self.config.format_currency(sale.total())
                )
            }
            ConsoleCommand::ListSales => self.render_sales(),
            ConsoleCommand::Dashboard => self.render_dashboard(&metrics::get_dashboard(&self.dashboard, &now)),
            ConsoleCommand::Goal(period) => self.render_goal(&goal::get_goal(&self.dashboard, period, &now)),
            ConsoleCommand::SetTarget { period, amount } => {
                let targets = goal::set_target(&self.dashboard, period, &amount)?;
                format!(
                    "Target {} set to {}",
                    period,
                    self.config.format_currency(targets.get(period))
                )
            }
            ConsoleCommand::WhatIf { period, amount } => {
                let state = goal::preview_goal(&self.dashboard, period, &amount, &now)?;
                self.render_goal(&state)
            }
            ConsoleCommand::Reset { confirmed } => {
                if !goal::has_data_to_reset(&self.dashboard) {
                    "Nothing to reset.".to_string()
                } else if !confirmed {
                    "This clears every sale and restores default targets. Run 'reset --yes' to confirm."
                        .to_string()
                } else {
                    let response = goal::reset_dashboard(&self.dashboard);
                    format!("Reset done: {} sale(s) cleared.", response.cleared_sales)
                }
            }
            ConsoleCommand::Advise => {
                let response = advisor::request_insights(&self.dashboard, &self.advisor, &now);
                let mut text = "Advisor request started. Run 'insights' to see the answer.".to_string();
                if response.replaced_pending {
                    text.push_str(" (previous request cancelled)");
                }
                if !response.advisor_configured {
                    text.push_str(" No API key configured.");
                }
                text
            }
            ConsoleCommand::Insights => {
                let insight = advisor::await_insights(&self.advisor).await?;
                insight.text().to_string()
            }
            ConsoleCommand::Status => {
                if self.advisor.is_running() {
                    "Advisor request running.".to_string()
                } else if self.advisor.has_pending() {
                    "Advisor answer ready. Run 'insights' to see it.".to_string()
                } else {
                    "No advisor request is pending.".to_string()
                }
            }
            ConsoleCommand::Cancel => {
                if advisor::cancel_insights(&self.advisor) {
                    "Advisor request cancelled.".to_string()
                } else {
                    "No advisor request is pending.".to_string()
                }
            }
            ConsoleCommand::Help => HELP_TEXT.to_string(),
            ConsoleCommand::Quit => return Ok(ConsoleOutput::Quit),
        };

        Ok(ConsoleOutput::Text(text))
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    fn render_sales(&self) -> String {
        let sales = sale::list_sales(&self.dashboard);
        if sales.is_empty() {
            return "No sales recorded.".to_string();
        }

        let tz = self.config.timezone();
        sales
            .iter()
            .map(|s| {
                format!(
                    "{}  {} x{} @ {} = {}",
                    s.timestamp().with_timezone(&tz).format("%Y-%m-%d %H:%M"),
                    s.product_name(),
                    s.quantity(),
                    self.config.format_currency(s.unit_price()),
                    self.config.format_currency(s.total())
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render_dashboard(&self, view: &metrics::DashboardView) -> String {
        let money = |m| self.config.format_currency(m);
        let m = &view.metrics;
        let mut lines = vec![
            format!("== {} ==", self.config.business_name),
            format!("Total revenue:    {}", money(m.total_revenue)),
            format!("Sales:            {}", m.total_sales_count),
            format!("Average ticket:   {}", money(m.average_ticket)),
            format!("This month:       {}", money(m.monthly_revenue)),
            format!("This year:        {}", money(m.annual_revenue)),
        ];

        if !view.top_products.is_empty() {
            lines.push(String::new());
            lines.push("Top products:".to_string());
            for p in &view.top_products {
                let tag = match p.category {
                    ProductCategory::Principal => "A",
                    ProductCategory::Secondary => "B/C",
                };
                lines.push(format!(
                    "  [{}] {}  {}  ({} un, {:.1}%)",
                    tag,
                    p.name,
                    money(p.total_revenue),
                    p.total_quantity,
                    p.percent_of_revenue
                ));
            }
        }

        if !view.category_breakdown.is_empty() {
            lines.push(String::new());
            lines.push("By category:".to_string());
            for c in &view.category_breakdown {
                lines.push(format!("  {}: {}", c.category, money(c.revenue)));
            }
        }

        if !view.timeline.is_empty() {
            lines.push(String::new());
            lines.push("Daily revenue:".to_string());
            for day in &view.timeline {
                lines.push(format!("  {}  {}", day.date.format("%d/%m"), money(day.revenue)));
            }
        }

        lines.push(String::new());
        lines.push(self.render_goal(&view.monthly_goal));
        lines.push(self.render_goal(&view.annual_goal));
        lines.join("\n")
    }

    fn render_goal(&self, goal: &GoalState) -> String {
        let money = |m| self.config.format_currency(m);
        let mut text = format!(
            "Goal ({}): {} of {}  [{:.1}%]",
            goal.period,
            money(goal.current_revenue),
            money(goal.target),
            goal.progress_percent
        );

        if goal.is_met() {
            text.push_str("\n  Goal met!");
            return text;
        }

        text.push_str(&format!("\n  Missing: {}", money(goal.revenue_gap)));
        text.push_str(&format!(
            "\n  At the average ticket: {} more sale(s)",
            goal.generic_sales_needed
        ));
        if let Some(name) = &goal.top_product_name {
            text.push_str(&format!(
                "\n  Selling only {}: {} more unit(s)",
                name, goal.top_product_units_needed
            ));
        }
        text
    }
}
