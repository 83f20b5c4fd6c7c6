//! Message sequences sent to the chat model.

use sectora_core::message::Message;
use sectora_search::types::SearchResult;

use crate::sections::SectionSpec;
use crate::types::{ChatTurn, ReportSection};

const ANALYST_SYSTEM: &str = "당신은 산업 분석 전문가입니다.";

const SECTIONS_SO_FAR_LABEL: &str = "[지금까지 작성된 보고서 내용]";
const PREVIOUS_SECTION_LABEL: &str = "[이전 섹션]";
const NEXT_SECTION_LABEL: &str = "[다음 섹션]";

/// Ask for five industries grounded in the search results.
pub fn recommendation_messages(keyword: &str, results: &[SearchResult]) -> Vec<Message> {
    let combined = results
        .iter()
        .map(SearchResult::as_prompt_text)
        .collect::<Vec<_>>()
        .join("\n\n");
    let prompt = format!(
        "다음은 '{keyword}' 키워드에 대해 검색된 문서 내용입니다:\n\n\
         {combined}\n\n\
         이 정보를 바탕으로 관련된 유망 산업군을 5개 추천해 주세요.\n\
         각 산업군은 다음 형식으로 작성해 주세요:\n\
         - 산업군명: 간단한 설명 (1-2문장)\n\n\
         반드시 각 줄은 \"산업군명:\"으로 시작하고 그 뒤에 설명이 오도록 작성해 주세요."
    );
    vec![Message::system(ANALYST_SYSTEM), Message::user(prompt)]
}

fn push_history(messages: &mut Vec<Message>, history: &[ChatTurn]) {
    for turn in history {
        messages.push(Message::user(turn.question.clone()));
        messages.push(Message::ai(turn.answer.clone()));
    }
}

/// Free-form question about the selected industry, replaying prior turns.
pub fn chat_messages(industry: &str, history: &[ChatTurn], question: &str) -> Vec<Message> {
    let mut messages = vec![Message::system(format!(
        "당신은 '{industry}' 산업군의 시장 분석 전문가입니다."
    ))];
    push_history(&mut messages, history);
    messages.push(Message::user(question));
    messages
}

fn writer_system(industry: &str) -> Message {
    Message::system(format!(
        "당신은 '{industry}' 산업군에 대한 전문적인 시장 분석 보고서를 작성하는 전문가입니다."
    ))
}

/// Request for the section at `index`, given everything authored before it.
pub fn section_messages(
    industry: &str,
    history: &[ChatTurn],
    authored: &[ReportSection],
    index: usize,
    spec: &SectionSpec,
) -> Vec<Message> {
    let mut messages = vec![writer_system(industry)];
    push_history(&mut messages, history);

    if !authored.is_empty() {
        let so_far = authored
            .iter()
            .map(ReportSection::render)
            .collect::<Vec<_>>()
            .join("\n\n");
        messages.push(Message::ai(format!("{SECTIONS_SO_FAR_LABEL}\n\n{so_far}")));
    }

    let title = spec.title;
    let description = spec.description;
    let number = index + 1;
    messages.push(Message::user(format!(
        "이제 보고서의 다음 섹션을 작성해주세요:\n\n\
         **섹션 {number}: {title}**\n\n\
         이 섹션에서 다룰 내용: {description}\n\n\
         **작성 지침:**\n\
         1. \"## {title}\" 형식으로 섹션 제목을 시작하세요\n\
         2. 이전 섹션들과 자연스럽게 연결되도록 작성하세요\n\
         3. 구체적인 데이터, 사례, 분석을 포함하세요\n\
         4. 전문적이고 설득력 있게 작성하세요\n\
         5. 넘버링이나 리스트를 사용할 때는 일관성을 유지하세요\n\
         6. 마무리 멘트 없이 섹션 내용만 작성하세요\n\n\
         지금까지의 대화 내용과 이전 섹션들을 참고하여 '{title}' 섹션을 상세히 작성해주세요."
    )));
    messages
}

/// Request to rewrite `sections[index]`. Neighbouring sections, when present,
/// are passed as one assistant turn.
pub fn rewrite_messages(
    industry: &str,
    history: &[ChatTurn],
    sections: &[ReportSection],
    index: usize,
) -> Option<Vec<Message>> {
    let target = sections.get(index)?;

    let mut messages = vec![writer_system(industry)];
    push_history(&mut messages, history);

    let mut context = Vec::new();
    if let Some(prev) = index.checked_sub(1).and_then(|i| sections.get(i)) {
        context.push(format!("{PREVIOUS_SECTION_LABEL}\n{}", prev.render()));
    }
    if let Some(next) = sections.get(index + 1) {
        context.push(format!("{NEXT_SECTION_LABEL}\n{}", next.render()));
    }
    if !context.is_empty() {
        messages.push(Message::ai(context.join("\n\n")));
    }

    let title = &target.title;
    let content = &target.content;
    messages.push(Message::user(format!(
        "'{title}' 섹션을 다시 작성해주세요.\n\n\
         이전 내용:\n{content}\n\n\
         **개선 사항:**\n\
         - 더 구체적인 데이터와 분석 추가\n\
         - 논리적 흐름 강화\n\
         - 이전/다음 섹션과의 연결성 개선\n\
         - 전문성과 설득력 향상\n\n\
         \"## {title}\" 형식으로 시작하여 섹션을 재작성해주세요."
    )));
    Some(messages)
}
