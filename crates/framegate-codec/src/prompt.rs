// SPDX-FileCopyrightText: 2026 Framegate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Oracle prompt composition.

use std::fmt::Write;

use framegate_core::{Frame, OraclePrompt};

/// Fixed routing instructions sent ahead of every frame.
///
/// The template demands a bare JSON object in reply; the decode side never
/// trusts the oracle to obey this.
const ROUTING_INSTRUCTIONS: &str = "\
You are an intelligent routing system for an assistive perception platform.

Your role is to analyze a video frame and optional audio input to determine \
which downstream service should be called:

1. **face_recognition** - Combined face recognition and speech processing.
   Use when human faces are visible, people are in frame, or audio/speech is \
present. Handles person identification, face detection, transcription, and \
text-to-speech.

2. **sign_language** - Sign language gesture detection.
   Use only when hand gestures or sign language movements are the PRIMARY \
focus of the frame.

3. **none** - No clear action needed: the frame is unclear, empty, or shows \
no relevant activity.

Priority rules:
- If faces AND sign language are both visible, prefer face_recognition unless \
sign language is the dominant feature.
- If audio or speech is present with any visual content, prefer \
face_recognition.

Analyze the provided frame and audio description, then respond with ONLY a \
JSON object in this exact format:
{
  \"route\": \"face_recognition\" | \"sign_language\" | \"none\",
  \"confidence\": 0.0-1.0,
  \"reasoning\": \"brief explanation\"
}

Be decisive and prioritize the most prominent features in the frame.";

/// Compose the outbound prompt for one frame.
pub(crate) fn compose(frame: &Frame) -> OraclePrompt {
    let mut text = String::from(ROUTING_INSTRUCTIONS);
    text.push_str("\n\nAnalyze this frame");
    if let Some(description) = &frame.audio_description {
        // Infallible for String targets.
        let _ = write!(text, " with audio input: {description}");
    }
    text.push_str(". Determine the appropriate routing decision.");

    OraclePrompt {
        text,
        visual: frame.visual.clone(),
    }
}
