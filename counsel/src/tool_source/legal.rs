//! Built-in legal knowledge base exposed as tools.
//!
//! Two tools: `search_legal_code` looks up Russian legal codes (ГК РФ, НК РФ,
//! федеральные законы) by keyword; `internal_knowledge_search` looks up the
//! internal methodology base. Both are keyword-matched against a small static
//! corpus; a miss returns a not-found text instead of an error, so the expert
//! can report honestly that nothing was found.

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use super::{ToolCallContent, ToolSource, ToolSourceError, ToolSpec};

pub const TOOL_SEARCH_LEGAL_CODE: &str = "search_legal_code";
pub const TOOL_INTERNAL_KNOWLEDGE_SEARCH: &str = "internal_knowledge_search";

const NOT_FOUND_LEGAL: &str =
    "Информация по данному запросу не найдена в базе законодательства.";
const NOT_FOUND_INTERNAL: &str =
    "Информация по данному запросу не найдена во внутренней базе знаний.";

const SALE_OF_GOODS: &str = "\
ГК РФ Статья 454. Договор купли-продажи.
1. По договору купли-продажи одна сторона (продавец) обязуется передать вещь \
(товар) в собственность другой стороне (покупателю), а покупатель обязуется \
принять этот товар и уплатить за него определённую денежную сумму (цену).
При продаже имущества юридическим лицом оформляются: договор купли-продажи, \
счёт-фактура, товарная накладная (ТОРГ-12), акт приёма-передачи.";

const PROFIT_TAX: &str = "\
НК РФ Статья 248. Порядок определения доходов. К доходам относятся доходы от \
реализации товаров (работ, услуг) и имущественных прав, а также \
внереализационные доходы.
НК РФ Статья 284. Налоговая ставка по налогу на прибыль организаций \
устанавливается в размере 20 процентов.";

const BANKRUPTCY: &str = "\
Федеральный закон от 26.10.2002 N 127-ФЗ «О несостоятельности (банкротстве)». \
Юридическое лицо считается неспособным удовлетворить требования кредиторов, \
если соответствующие обязательства не исполнены им в течение трёх месяцев с \
даты, когда они должны были быть исполнены.";

const INTERNAL_PROFIT_TAX: &str = "\
Внутренняя база знаний: налог на прибыль организаций.
Налог на прибыль — прямой налог, взимаемый с прибыли организации (доходы минус \
расходы). Основная ставка — 20%: 3% в федеральный бюджет, 17% в бюджет \
субъекта РФ. Налоговый период — календарный год, отчётные периоды — первый \
квартал, полугодие, девять месяцев.";

const INTERNAL_VAT: &str = "\
Внутренняя база знаний: НДС (налог на добавленную стоимость).
Косвенный налог, включается в цену товара. Основная ставка — 20%, льготные — \
10% и 0% для отдельных категорий. Плательщики — организации и ИП на общей \
системе налогообложения.";

/// Keyword-matched legal knowledge base.
///
/// **Interaction**: Passed to `ToolNode` for execution and to
/// `ChatOpenAI::with_tools` (via `list_tools`) so the expert LLM sees the same
/// tool set it can call.
#[derive(Debug, Default, Clone)]
pub struct LegalCodeToolSource;

impl LegalCodeToolSource {
    pub fn new() -> Self {
        Self
    }

    fn query_from_args(arguments: &Value) -> Result<String, ToolSourceError> {
        arguments
            .get("query")
            .and_then(|q| q.as_str())
            .map(|q| q.to_string())
            .ok_or_else(|| {
                ToolSourceError::InvalidInput("missing required argument: query".to_string())
            })
    }

    fn search_legal_code(query: &str) -> &'static str {
        let q = query.to_lowercase();
        if q.contains("мебел") || q.contains("продаж") || q.contains("купл") {
            SALE_OF_GOODS
        } else if q.contains("налог") {
            PROFIT_TAX
        } else if q.contains("банкрот") {
            BANKRUPTCY
        } else {
            NOT_FOUND_LEGAL
        }
    }

    fn internal_knowledge_search(query: &str) -> &'static str {
        let q = query.to_lowercase();
        if q.contains("налог") || q.contains("прибыл") {
            INTERNAL_PROFIT_TAX
        } else if q.contains("ндс") {
            INTERNAL_VAT
        } else {
            NOT_FOUND_INTERNAL
        }
    }
}

#[async_trait]
impl ToolSource for LegalCodeToolSource {
    async fn list_tools(&self) -> Result<Vec<ToolSpec>, ToolSourceError> {
        let query_schema = json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Поисковый запрос"
                }
            },
            "required": ["query"]
        });
        Ok(vec![
            ToolSpec {
                name: TOOL_SEARCH_LEGAL_CODE.to_string(),
                description: Some(
                    "Ищет информацию в нормативных документах РФ (ГК РФ, НК РФ, \
                     федеральные законы). Используй для вопросов о договорах, \
                     налогах и банкротстве."
                        .to_string(),
                ),
                input_schema: query_schema.clone(),
            },
            ToolSpec {
                name: TOOL_INTERNAL_KNOWLEDGE_SEARCH.to_string(),
                description: Some(
                    "Ищет статьи и методические материалы во внутренней базе \
                     знаний компании. Возвращает содержимое найденных документов."
                        .to_string(),
                ),
                input_schema: query_schema,
            },
        ])
    }

    async fn call_tool(
        &self,
        name: &str,
        arguments: Value,
    ) -> Result<ToolCallContent, ToolSourceError> {
        let query = Self::query_from_args(&arguments)?;
        debug!(tool = name, query = %query, "legal tool call");
        let text = match name {
            TOOL_SEARCH_LEGAL_CODE => Self::search_legal_code(&query),
            TOOL_INTERNAL_KNOWLEDGE_SEARCH => Self::internal_knowledge_search(&query),
            other => return Err(ToolSourceError::NotFound(other.to_string())),
        };
        Ok(ToolCallContent {
            text: text.to_string(),
        })
    }
}
