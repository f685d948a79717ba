//! Prompt construction.
//!
//! Only formats figures that the metrics engine already derived. Nothing here
//! computes revenue, rankings or projections of its own, apart from the plain
//! progress ratio quoted in the text.

use fluir_core::{GoalTargets, Metrics, Money, ProductCategory};

/// Monthly progress below this percentage asks for an emergency action.
pub const LOW_PROGRESS_PERCENT: f64 = 70.0;

/// Business details quoted in the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptContext {
    pub business_name: String,
    pub currency_symbol: String,
}

impl Default for PromptContext {
    fn default() -> Self {
        PromptContext {
            business_name: "Agência Fluir".to_string(),
            currency_symbol: "R$".to_string(),
        }
    }
}

impl PromptContext {
    fn money(&self, value: Money) -> String {
        format!("{} {}", self.currency_symbol, value)
    }
}

/// Progress quoted to the advisor: uncapped, and `0` when the target is `0`.
pub fn quoted_progress(current: Money, target: Money) -> f64 {
    if !target.is_positive() {
        return 0.0;
    }
    current.cents() as f64 * 100.0 / target.cents() as f64
}

fn product_names(metrics: &Metrics, category: ProductCategory) -> String {
    metrics
        .products_in(category)
        .map(|p| p.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Builds the insights prompt for a metrics snapshot and the current targets.
pub fn build_prompt(metrics: &Metrics, targets: &GoalTargets, ctx: &PromptContext) -> String {
    format!(
        "Atue como um consultor de negócios sênior especialista em performance de agências.\n\
         Analise os seguintes dados da \"{business}\":\n\
         \n\
         DADOS FINANCEIROS:\n\
         - Faturamento Mês Atual: {monthly} (Meta: {monthly_target}) - Progresso: {monthly_progress:.1}%\n\
         - Faturamento Ano Atual: {annual} (Meta: {annual_target}) - Progresso: {annual_progress:.1}%\n\
         - Ticket Médio Global: {ticket}\n\
         \n\
         PRODUTOS:\n\
         - Principais (Curva A): {principal}\n\
         - Secundários (Curva B/C): {secondary}\n\
         \n\
         SOLICITAÇÃO:\n\
         Forneça uma análise estratégica curta em Markdown.\n\
         1. Se o progresso mensal estiver baixo (<{low:.0}%), dê uma ação de emergência para fechar o mês.\n\
         2. Se o anual estiver baixo, sugira uma mudança estrutural.\n\
         3. Sugira como usar os produtos principais para alavancar o ticket médio.\n\
         \n\
         Seja direto, motivador e use emojis para facilitar a leitura.",
        business = ctx.business_name,
        monthly = ctx.money(metrics.monthly_revenue),
        monthly_target = ctx.money(targets.monthly),
        monthly_progress = quoted_progress(metrics.monthly_revenue, targets.monthly),
        annual = ctx.money(metrics.annual_revenue),
        annual_target = ctx.money(targets.annual),
        annual_progress = quoted_progress(metrics.annual_revenue, targets.annual),
        ticket = ctx.money(metrics.average_ticket),
        principal = product_names(metrics, ProductCategory::Principal),
        secondary = product_names(metrics, ProductCategory::Secondary),
        low = LOW_PROGRESS_PERCENT,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use fluir_core::ProductSummary;

    fn summary(name: &str, cents: i64, category: ProductCategory) -> ProductSummary {
        ProductSummary {
            name: name.to_string(),
            total_revenue: Money::from_cents(cents),
            total_quantity: 1,
            percent_of_revenue: 0.0,
            category,
        }
    }

    fn sample_metrics() -> Metrics {
        Metrics {
            total_revenue: Money::from_major(9_000),
            total_sales_count: 30,
            average_ticket: Money::from_major(300),
            monthly_revenue: Money::from_major(6_500),
            annual_revenue: Money::from_major(9_000),
            products: vec![
                summary("Consultoria", 600_000, ProductCategory::Principal),
                summary("Curso", 200_000, ProductCategory::Secondary),
                summary("Ebook", 100_000, ProductCategory::Secondary),
            ],
        }
    }

    #[test]
    fn test_prompt_contains_figures() {
        let prompt = build_prompt(&sample_metrics(), &GoalTargets::default(), &PromptContext::default());

        assert!(prompt.contains("Agência Fluir"));
        assert!(prompt.contains("Faturamento Mês Atual: R$ 6500.00 (Meta: R$ 10000.00) - Progresso: 65.0%"));
        assert!(prompt.contains("Faturamento Ano Atual: R$ 9000.00 (Meta: R$ 120000.00) - Progresso: 7.5%"));
        assert!(prompt.contains("Ticket Médio Global: R$ 300.00"));
        assert!(prompt.contains("Principais (Curva A): Consultoria"));
        assert!(prompt.contains("Secundários (Curva B/C): Curso, Ebook"));
        assert!(prompt.contains("(<70%)"));
    }

    #[test]
    fn test_prompt_layout() {
        let prompt = build_prompt(&sample_metrics(), &GoalTargets::default(), &PromptContext::default());
        let lines: Vec<&str> = prompt.lines().collect();

        assert_eq!(lines.len(), 19);
        assert_eq!(
            lines[0],
            "Atue como um consultor de negócios sênior especialista em performance de agências."
        );
        assert_eq!(lines[1], "Analise os seguintes dados da \"Agência Fluir\":");
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], "DADOS FINANCEIROS:");
        assert_eq!(lines[8], "PRODUTOS:");
        assert_eq!(lines[12], "SOLICITAÇÃO:");
        assert_eq!(
            lines[18],
            "Seja direto, motivador e use emojis para facilitar a leitura."
        );
    }

    #[test]
    fn test_prompt_with_empty_metrics() {
        let prompt = build_prompt(&Metrics::default(), &GoalTargets::default(), &PromptContext::default());
        assert!(prompt.contains("Progresso: 0.0%"));
        assert!(prompt.contains("Principais (Curva A): \n"));
    }

    #[test]
    fn test_quoted_progress_is_uncapped_and_zero_safe() {
        assert_eq!(quoted_progress(Money::from_major(150), Money::from_major(100)), 150.0);
        assert_eq!(quoted_progress(Money::from_major(150), Money::zero()), 0.0);
    }

    #[test]
    fn test_custom_context() {
        let ctx = PromptContext {
            business_name: "Loja Azul".to_string(),
            currency_symbol: "$".to_string(),
        };
        let prompt = build_prompt(&sample_metrics(), &GoalTargets::default(), &ctx);
        assert!(prompt.contains("\"Loja Azul\""));
        assert!(prompt.contains("$ 300.00"));
    }
}
