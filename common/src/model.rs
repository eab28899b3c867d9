//! 生成モデルの抽象
//!
//! CLIはreqwest、WebはfetchでGeminiを呼ぶ。テストではスクリプト化したモックを使う。

use crate::error::ModelError;
use crate::parser::parse_prompt_output;
use crate::prompts::{Prompt, PromptRequest};

/// テキスト応答を返す生成モデル
///
/// WASMのfutureは `Send` でないため、`Send` 境界は付けない。
#[allow(async_fn_in_trait)]
pub trait GenerativeModel {
    async fn generate(&self, request: &PromptRequest<'_>) -> Result<String, ModelError>;
}

impl<M: GenerativeModel + ?Sized> GenerativeModel for &M {
    async fn generate(&self, request: &PromptRequest<'_>) -> Result<String, ModelError> {
        (**self).generate(request).await
    }
}

/// プロンプトを実行し、出力型へパースして返す
pub async fn run_prompt<M, P>(model: &M, prompt: &P) -> Result<P::Output, ModelError>
where
    M: GenerativeModel + ?Sized,
    P: Prompt,
{
    let request = prompt.to_request();
    log::debug!("{}: request ({} chars)", P::KIND.name(), request.text.len());

    let response = model.generate(&request).await?;
    log::debug!("{}: response ({} chars)", P::KIND.name(), response.len());

    parse_prompt_output::<P>(&response)
}
