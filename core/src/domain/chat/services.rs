use std::future::Future;

use tracing::{error, instrument, warn};

use crate::domain::{
    chat::{
        entities::ChatTurn,
        policies::is_ignored,
        value_objects::{ChatExchange, ChatReply, NO_INGREDIENTS_MESSAGE},
    },
    common::{entities::app_errors::CoreError, ports::LLMClient, services::Service},
    history::ports::HistoryRepository,
    presenter::services::PresenterService,
    profile::{entities::Profile, ports::ProfileRepository},
    risk::ports::FoodDatabaseClient,
    scan::ports::OcrClient,
};

pub fn build_chat_prompt(profile: &Profile, ingredients: &[String], question: &str) -> String {
    format!(
        r#"
You are FoodGuard AI, a nutrition expert.
User health: {health}
User selected conditions: {conditions}
Currently scanned ingredients: {ingredients}

Question: "{question}"

Respond in 3–4 short sentences.
Focus ONLY on health effects of the ingredient related to the user's conditions.
Provide simple, actionable advice.
Avoid long explanations or general dietary tips.
Use bullet points only if necessary.
"#,
        health = profile.health_summary(),
        conditions = profile.selected_conditions.join(", "),
        ingredients = ingredients.join(", "),
        question = question,
    )
}

/// Service trait for the ingredient chat assistant
pub trait ChatService: Send + Sync {
    fn send_chat(
        &self,
        message: String,
    ) -> impl Future<Output = Result<ChatExchange, CoreError>> + Send;

    /// Asks the fixed question attached to an ingredient card.
    fn ask_about_card(
        &self,
        index: usize,
    ) -> impl Future<Output = Result<ChatExchange, CoreError>> + Send;

    fn get_transcript(&self) -> impl Future<Output = Result<Vec<ChatTurn>, CoreError>> + Send;
}

impl<OCR, LLM, FD, HR, PR> ChatService for Service<OCR, LLM, FD, HR, PR>
where
    OCR: OcrClient,
    LLM: LLMClient,
    FD: FoodDatabaseClient,
    HR: HistoryRepository,
    PR: ProfileRepository,
{
    #[instrument(skip_all)]
    async fn send_chat(&self, message: String) -> Result<ChatExchange, CoreError> {
        let question = message.trim();
        if is_ignored(question) {
            return Ok(ChatExchange::ignored());
        }

        let question_turn = ChatTurn::user(question);
        self.session
            .record_turns(std::slice::from_ref(&question_turn))
            .await;

        let ingredients = self.session.ingredients().await;
        let reply = if ingredients.is_empty() {
            NO_INGREDIENTS_MESSAGE.to_string()
        } else {
            let profile = self
                .profile_repository
                .get_profile()
                .await
                .unwrap_or_else(|e| {
                    warn!(error = %e, "failed to read profile, answering without it");
                    Profile::default()
                });

            let prompt = build_chat_prompt(&profile, &ingredients, question);
            let reply = ChatReply::from(self.llm_client.generate_with_text(prompt).await);
            if let ChatReply::Failed(e) = &reply {
                error!(error = %e, "chat completion failed");
            }
            reply.into_text()
        };

        let reply_turn = ChatTurn::ai(reply);
        self.session
            .record_turns(std::slice::from_ref(&reply_turn))
            .await;

        Ok(ChatExchange {
            recorded: true,
            turns: vec![question_turn, reply_turn],
        })
    }

    async fn ask_about_card(&self, index: usize) -> Result<ChatExchange, CoreError> {
        let card = self.get_card(index).await?;
        self.send_chat(card.question).await
    }

    async fn get_transcript(&self) -> Result<Vec<ChatTurn>, CoreError> {
        Ok(self.session.transcript().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        chat::{
            entities::ChatRole,
            value_objects::{EMPTY_REPLY_MESSAGE, FAILED_REPLY_MESSAGE},
        },
        common::{
            ports::MockLLMClient,
            test_support::{FakeLlm, service},
        },
        risk::entities::{RiskResult, RiskTag},
    };

    async fn with_ingredients<LLM>(
        service: &crate::domain::common::test_support::TestService<LLM>,
        ingredients: &[&str],
    ) where
        LLM: LLMClient,
    {
        let ticket = service.session.begin().await;
        let ingredients: Vec<String> = ingredients.iter().map(|s| s.to_string()).collect();
        let results = ingredients
            .iter()
            .map(|i| RiskResult::new(i.clone(), RiskTag::Moderate))
            .collect();
        service.session.publish_ingredients(ticket, ingredients).await;
        service.session.publish_results(ticket, results).await;
    }

    #[tokio::test]
    async fn test_casual_messages_send_nothing() {
        let mut llm = MockLLMClient::new();
        llm.expect_generate_with_text().never();
        let service = service(llm);
        with_ingredients(&service, &["sugar"]).await;

        for message in ["thanks", "THANKS", "Hello", "", "   "] {
            let exchange = service.send_chat(message.to_string()).await.unwrap();
            assert_eq!(exchange, ChatExchange::ignored());
        }
        assert!(service.get_transcript().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_without_ingredients_answers_locally() {
        let mut llm = MockLLMClient::new();
        llm.expect_generate_with_text().never();
        let service = service(llm);

        let exchange = service
            .send_chat("Is this healthy?".to_string())
            .await
            .unwrap();

        assert!(exchange.recorded);
        assert_eq!(exchange.turns[0], ChatTurn::user("Is this healthy?"));
        assert_eq!(exchange.turns[1], ChatTurn::ai(NO_INGREDIENTS_MESSAGE));
        assert_eq!(service.get_transcript().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_prompt_carries_context() {
        let llm = FakeLlm::replying("Sugar spikes blood glucose.");
        let service = service(llm);
        with_ingredients(&service, &["sugar", "salt"]).await;

        let exchange = service
            .send_chat("  Is sugar ok for me? ".to_string())
            .await
            .unwrap();

        assert_eq!(exchange.turns[1].role, ChatRole::Ai);
        assert_eq!(exchange.turns[1].text, "Sugar spikes blood glucose.");
        let prompts = service.llm_client.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("User health: general health"));
        assert!(prompts[0].contains("Currently scanned ingredients: sugar, salt"));
        assert!(prompts[0].contains("Question: \"Is sugar ok for me?\""));
    }

    #[tokio::test]
    async fn test_empty_and_failed_replies_apologize() {
        let service = service(FakeLlm::failing(CoreError::EmptyCompletion));
        with_ingredients(&service, &["sugar"]).await;
        let exchange = service.send_chat("why?".to_string()).await.unwrap();
        assert_eq!(exchange.turns[1].text, EMPTY_REPLY_MESSAGE);

        let service = service_failing();
        with_ingredients(&service, &["sugar"]).await;
        let exchange = service.send_chat("why?".to_string()).await.unwrap();
        assert_eq!(exchange.turns[1].text, FAILED_REPLY_MESSAGE);
    }

    fn service_failing() -> crate::domain::common::test_support::TestService<FakeLlm> {
        service(FakeLlm::failing(CoreError::ExternalServiceError(
            "connection refused".to_string(),
        )))
    }

    #[tokio::test]
    async fn test_card_click_asks_templated_question() {
        let service = service(FakeLlm::replying("Salt raises blood pressure."));
        with_ingredients(&service, &["sugar", "salt"]).await;

        let exchange = service.ask_about_card(1).await.unwrap();

        assert_eq!(
            exchange.turns[0],
            ChatTurn::user("Tell me about salt and its health effects")
        );
        assert_eq!(
            service.ask_about_card(7).await.unwrap_err(),
            CoreError::NotFound
        );
    }
}
