//! Counsel CLI: run the supervisor + legal expert agent from the command line.
//!
//! With no arguments it runs three demo queries (legal lookup, internal
//! knowledge lookup, greeting) and prints the conversation trace of each.
//! `--query` runs a single query; `--mock` replaces the LLMs with canned
//! responders so the full graph can be exercised without an API key.

mod logging;

use std::sync::Arc;

use clap::Parser;

use counsel::llm::MockLlm;
use counsel::runner::{build_agent_graph, build_openai_graph, initial_state};
use counsel::settings::AgentConfig;
use counsel::tool_source::LegalCodeToolSource;
use counsel::{AgentState, CompiledStateGraph, Message, ToolCall};

#[derive(Parser, Debug)]
#[command(name = "counsel")]
#[command(about = "Counsel — supervisor + legal expert agent")]
struct Args {
    /// Run a single query instead of the demo set
    #[arg(short, long, value_name = "TEXT")]
    query: Option<String>,

    /// Use mock LLMs and the built-in knowledge base (no API key needed)
    #[arg(long)]
    mock: bool,
}

const DEMO_QUERIES: [&str; 3] = [
    "Как правильно оформить продажу офисной мебели юрлицом?",
    "Найди во внутренней базе знаний информацию о налоге на прибыль. Кратко расскажи, что это за налог",
    "Привет, кто ты?",
];

fn role_name(message: &Message) -> &'static str {
    match message {
        Message::System(_) => "System",
        Message::User(_) => "User",
        Message::Assistant(_) => "Assistant",
        Message::Tool { .. } => "Tool",
    }
}

fn print_trace(state: &AgentState) {
    println!("\nХОД ВЫПОЛНЕНИЯ:");
    for (i, message) in state.messages.iter().enumerate() {
        println!("\n{}. {}:", i + 1, role_name(message));
        match message {
            Message::System(c) | Message::User(c) | Message::Assistant(c) => {
                println!("   Содержание: {}", c);
            }
            Message::Tool { name, content } => {
                println!("   Инструмент: {}", name);
                println!("   Содержание: {}", content);
            }
        }
    }
    println!("\nФИНАЛЬНОЕ СОСТОЯНИЕ: {}", state.next.as_str());
}

/// Builds a graph with canned LLM responses fitting the query, so the demo
/// runs the real graph and real tools without touching an API.
fn build_mock_graph(query: &str) -> Result<CompiledStateGraph<AgentState>, counsel::AgentError> {
    let q = query.to_lowercase();
    let legal = q.contains("мебел")
        || q.contains("продаж")
        || q.contains("налог")
        || q.contains("договор")
        || q.contains("банкрот");

    let (supervisor, expert) = if legal {
        let (tool, answer) = if q.contains("внутренней базе") || q.contains("налог") {
            (
                ToolCall {
                    name: "internal_knowledge_search".to_string(),
                    arguments: r#"{"query": "налог на прибыль"}"#.to_string(),
                    id: Some("call_1".to_string()),
                },
                "Налог на прибыль — прямой налог с прибыли организации, основная \
                 ставка 20% (3% в федеральный бюджет, 17% в региональный).",
            )
        } else {
            (
                ToolCall {
                    name: "search_legal_code".to_string(),
                    arguments: r#"{"query": "продажа офисной мебели юрлицом"}"#.to_string(),
                    id: Some("call_1".to_string()),
                },
                "Продажа офисной мебели юрлицом оформляется договором купли-продажи \
                 (ГК РФ ст. 454), счётом-фактурой и накладной ТОРГ-12.",
            )
        };
        (
            MockLlm::with_no_tool_calls(r#"{"next": "legal_expert"}"#),
            MockLlm::first_tools_then_answer(tool, answer),
        )
    } else {
        (
            MockLlm::with_no_tool_calls(r#"{"next": "finish"}"#),
            MockLlm::with_no_tool_calls(""),
        )
    };

    build_agent_graph(
        Arc::new(supervisor),
        Arc::new(expert),
        Box::new(LegalCodeToolSource::new()),
        3,
        25,
    )
    .map_err(|e| counsel::AgentError::ExecutionFailed(format!("graph compilation failed: {}", e)))
}

async fn run_query(args: &Args, config: &AgentConfig, query: &str) {
    println!("\n{}", "=".repeat(60));
    println!("ТЕСТ: {}", query);
    println!("{}", "=".repeat(60));

    let graph = if args.mock {
        build_mock_graph(query)
    } else {
        build_openai_graph(config).await
    };

    let graph = match graph {
        Ok(g) => g,
        Err(e) => {
            println!("ОШИБКА: {}", e);
            return;
        }
    };

    match graph.invoke(initial_state(query)).await {
        Ok(state) => print_trace(&state),
        Err(e) => println!("ОШИБКА: {}", e),
    }
}

#[tokio::main]
async fn main() {
    // Env priority: process env > project .env > ~/.config/counsel/config.toml.
    if let Err(e) = env_config::load_and_apply("counsel", None) {
        eprintln!("конфигурация не загружена: {}", e);
    }
    if let Err(e) = logging::init() {
        eprintln!("логирование не инициализировано: {}", e);
    }

    let args = Args::parse();
    let config = AgentConfig::from_env();

    if !args.mock && config.api_key.is_none() {
        println!("ВНИМАНИЕ: Не найден API ключ для LLM.");
        println!("Установите OPENAI_API_KEY в .env файле или запустите с --mock.");
        return;
    }

    println!("Counsel — Supervisor + Legal Expert");

    match &args.query {
        Some(query) => run_query(&args, &config, query).await,
        None => {
            println!("\nЗапуск тестовых сценариев...");
            for query in DEMO_QUERIES {
                run_query(&args, &config, query).await;
            }
        }
    }

    println!("\n{}", "=".repeat(60));
    println!("ТЕСТИРОВАНИЕ ЗАВЕРШЕНО");
    println!("{}", "=".repeat(60));
}
