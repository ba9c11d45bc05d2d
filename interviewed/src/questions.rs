//! Default interview question bank.
//!
//! One question per [`SignatureDimension`], asked in dimension order.

use crate::types::{InterviewQuestion, SignatureDimension};

/// The built-in question bank.
pub fn default_questions() -> Vec<InterviewQuestion> {
    vec![
        InterviewQuestion::new(
            "hunger_1",
            "What's something you keep looking for but haven't found yet?",
            SignatureDimension::Hunger,
            "Core unsatisfied need",
        )
        .with_trigger(
            "connection",
            "What would that connection feel like if you found it?",
        )
        .with_trigger("understanding", "What would change if you understood it?"),
        InterviewQuestion::new(
            "gift_1",
            "What do people come to you for, even when you haven't offered?",
            SignatureDimension::Gift,
            "Natural gift",
        ),
        InterviewQuestion::new(
            "movement_1",
            "When you're stuck on something hard, what do you do?",
            SignatureDimension::Movement,
            "Problem-solving pattern",
        )
        .with_trigger("walk", "What happens during the walk?")
        .with_trigger("wait", "What are you waiting for?"),
        InterviewQuestion::new(
            "environment_1",
            "Describe a time you felt completely in your element.",
            SignatureDimension::Environment,
            "Activation context",
        ),
        InterviewQuestion::new(
            "affinity_1",
            "What kinds of problems feel like they were made for you?",
            SignatureDimension::Affinity,
            "Problem affinity",
        ),
        InterviewQuestion::new(
            "edge_1",
            "What are you trying to get better at right now?",
            SignatureDimension::Edge,
            "Growth edge",
        ),
        InterviewQuestion::new(
            "wound_1",
            "What hard experience taught you something you couldn't have learned any other way?",
            SignatureDimension::Wound,
            "Integrated wound",
        ),
        InterviewQuestion::new(
            "vision_1",
            "If you could contribute to solving one problem for the world, what would it be?",
            SignatureDimension::Vision,
            "World-vision",
        ),
    ]
}
