//! Shared rule documents for the parser test suites.
//!
//! Error-path tests assert exact line/column positions, so the layout
//! of these documents is load-bearing: do not re-indent.

#![allow(dead_code)]

pub const SIMPLE_SEQUENCE: &str = "
rules:
  - cre:
      id: cre-kafka-thread-blocked
      severity: 1
    metadata:
      id: \"J7uRQTGpGMyL1iFpssnBeS\"
      hash: \"rdJLgqYgkEp8jg8Qks1qiq\"
      generation: 1
    rule:
      sequence:
        window: 10s
        event:
          source: kafka
        order:
          - value: \"io.vertx.core.VertxException: Thread blocked\"
            count: 3
";

pub const COMPLEX_NESTED: &str = "
rules:
  - cre:
      id: cre-rabbitmq-cascade
      severity: 1
    metadata:
      id: \"J7uRQTGpGMyL1iFpssnBeS\"
      hash: \"rdJLgqYgkEp8jg8Qks1qiq\"
      generation: 1
    rule:
      sequence:
        window: 30s
        correlations:
          - hostname
        order:
          - term1
          - term2
          - term3
terms:
  term1:
    sequence:
      window: 10s
      event:
        source: rabbitmq
        origin: true
      order:
        - value: Discarding message
          count: 10
        - Mnesia overloaded
      negate:
        - SIGTERM
  term2:
    set:
      window: 1s
      event:
        source: k8s
      match:
        - field: \"reason\"
          value: \"Killing\"
        - field: \"reason\"
          value: \"NodeShutdown\"
      negate:
        - SIGTERM
  term3:
    sequence:
      window: 5s
      correlations:
        - hostname
      order:
        - sequence:
            window: 1s
            event:
              source: nginx
            order:
              - error message
              - shutdown
        - set:
            event:
              source: nginx
            match:
              - 90%
        - set:
            event:
              source: k8s
            match:
              - field: \"reason\"
                value: \"Killing\"
";

pub const COMPLEX_MIXED: &str = "
rules:
  - cre:
      id: cre-rabbitmq-killed
    metadata:
      id: \"J7uRQTGpGMyL1iFpssnBeS\"
      hash: \"rdJLgqYgkEp8jg8Qks1qiq\"
    rule:
      sequence:
        window: 30s
        correlations:
          - hostname
        order:
          - term1
          - term2
terms:
  term1:
    sequence:
      window: 10s
      event:
        source: rabbitmq
        origin: true
      order:
        - value: Discarding message
          count: 10
        - Mnesia overloaded
      negate:
        - SIGTERM
  term2:
    set:
      event:
        source: k8s
      match:
        - field: \"reason\"
          value: \"Killing\"
";

pub const COMPLEX_NEGATED: &str = "
rules:
  - cre:
      id: cre-nginx-rollout
    metadata:
      id: \"J7uRQTGpGMyL1iFpssnBeS\"
      hash: 2KdXQZDAfRbYcH9FBDteBS
    rule:
      sequence:
        window: 30s
        correlations:
          - hostname
        order:
          - term1
          - term2
          - term4
        negate:
          - term3

terms:
  term1:
    sequence:
      window: 10s
      event:
        source: rabbitmq
        origin: true
      order:
        - value: Discarding message
          count: 10
        - Mnesia overloaded
      negate:
        - SIGTERM

  term2:
    sequence:
      window: 5s
      correlations:
        - container_id
      order:
        - sequence:
            window: 1s
            event:
              source: nginx
            order:
              - error message
              - shutdown
        - set:
            event:
              source: nginx
            match:
              - 90%
        - set:
            event:
              source: k8s
            match:
              - field: \"reason\"
                value: \"Killing\"
  term4:
    sequence:
      window: 5s
      correlations:
        - container_id
      order:
        - sequence:
            window: 1s
            event:
              source: nginx
            order:
              - error message
              - shutdown
        - set:
            event:
              source: nginx
            match:
              - 90%
        - set:
            event:
              source: k8s
            match:
              - field: \"reason\"
                value: \"Killing\"
  term3:
    set:
      event:
        source: k8s
      match:
        - field: \"reason\"
          value: \"NodeShutdown\"
";

pub const NEGATE_OPTIONS_INLINE: &str = "
rules:
  - cre:
      id: cre-kafka-blocked-no-signal
    metadata:
      id: \"J7uRQTGpGMyL1iFpssnBeS\"
      hash: \"rdJLgqYgkEp8jg8Qks1qiq\"
      generation: 1
    rule:
      sequence:
        window: 10s
        event:
          source: kafka
        order:
          - value: \"io.vertx.core.VertxException: Thread blocked\"
            count: 3
        negate:
          - value: \"SIGTERM\"
            window: 10s
            slide: 1s
          - value: \"SIGKILL\"
            window: 10s
            slide: 1s
";

pub const NEGATE_OPTIONS_RESOLVED: &str = "
rules:
  - cre:
      id: cre-rabbitmq-no-drain
    metadata:
      id: \"J7uRQTGpGMyL1iFpssnBeS\"
      hash: \"rdJLgqYgkEp8jg8Qks1qiq\"
      generation: 1
    rule:
      sequence:
        window: 30s
        correlations:
          - hostname
        order:
          - term1
          - term2
        negate:
          - value: term3
            window: 10s
            slide: 1s

terms:
  term1:
    sequence:
      window: 10s
      event:
        source: log
        origin: true
      order:
        - value: Discarding message
          count: 10
        - Mnesia overloaded
      negate:
        - SIGTERM
  term2:
    set:
      event:
        source: k8s
      match:
      - field: \"reason\"
        value: \"Killing\"
  term3:
    set:
      event:
        source: log
      match:
        - value: \"Killing\"
";

/* Failure documents. Position assertions count lines from the leading
comment, which is line 1. */

pub const FAIL_TYPO: &str = " # Line 1 starts here
rules:
  - cre:
      id: cre-typo
      severity: 1
    metadata:
      id: \"J7uRQTGpGMyL1iFpssnBeS\"
      hash: \"rdJLgqYgkEp8jg8Qks1qiq\"
      generation: 1
    rule:
      sequence:
        window: 10s
        event:
          source: kafka
        order:
          - regexs: \"io.vertx.core.VertxException: Thread blocked\"        # typo
";

pub const FAIL_MISSING_ORDER: &str = " # Line 1 starts here
rules:
  - cre:
      id: cre-missing-order
      severity: 1
    metadata:
      id: \"J7uRQTGpGMyL1iFpssnBeS\"
      hash: \"rdJLgqYgkEp8jg8Qks1qiq\"
      generation: 1
    rule:
      sequence:
        window: 10s
        event:
          source: kafka
        match:                                                            # cannot use match with sequence
          - regex: \"io.vertx.core.VertxException: Thread blocked\"
";

pub const FAIL_MISSING_MATCH: &str = " # Line 1 starts here
rules:
  - cre:
      id: cre-missing-match
      severity: 1
    metadata:
      id: \"J7uRQTGpGMyL1iFpssnBeS\"
      hash: \"rdJLgqYgkEp8jg8Qks1qiq\"
      generation: 1
    rule:
      set:
        window: 10s
        event:
          source: kafka
        order:                                                            # cannot use order with set
          - regex: \"io.vertx.core.VertxException: Thread blocked\"
";

pub const FAIL_INVALID_WINDOW: &str = " # Line 1 starts here
rules:
  - cre:
      id: cre-invalid-window
      severity: 1
    metadata:
      id: \"J7uRQTGpGMyL1iFpssnBeS\"
      hash: \"rdJLgqYgkEp8jg8Qks1qiq\"
      generation: 1
    rule:
      set:
        window: 10d                                                       # invalid window
        event:
          source: kafka
        match:
          - regex: \"io.vertx.core.VertxException: Thread blocked\"
";

pub const FAIL_UNSUPPORTED_RULE: &str = " # Line 1 starts here
rules:
  - cre:
      id: cre-unsupported
      severity: 1
    metadata:
      id: \"J7uRQTGpGMyL1iFpssnBeS\"
      hash: \"rdJLgqYgkEp8jg8Qks1qiq\"
      generation: 1
    rule:
      superduperset:                                                       # unsupported rule type
        window: 10s
        event:
          source: kafka
        match:
          - regex: \"io.vertx.core.VertxException: Thread blocked\"
";

pub const FAIL_TERMS_MISSING_MATCH: &str = " # Line 1 starts here
rules:
  - cre:
      id: cre-terms-missing-match
    metadata:
      id: \"J7uRQTGpGMyL1iFpssnBeS\"
      hash: \"rdJLgqYgkEp8jg8Qks1qiq\"
      generation: 1
    rule:
      sequence:
        window: 30s
        correlations:
          - hostname
        order:
          - term1
          - term2
          - term3

terms:
  term1:
    sequence:
      window: 10s
      event:
        source: rabbitmq
        origin: true
      order:
        - value: Discarding message
          count: 10
        - Mnesia overloaded
      negate:
        - SIGTERM
  term2:
    set:
      event:
        source: k8s
      moooch:
      - field: \"reason\"
        value: \"Killing\"
  term3:
    set:
      event:
        source: k8s
      negate:
        - field: \"reason\"
          value: \"Killing\"
          window: 10s
          slide: 1s
";

pub const FAIL_TERMS_INVALID_WINDOW: &str = " # Line 1 starts here
rules:
  - cre:
      id: cre-terms-invalid-window
    metadata:
      id: \"J7uRQTGpGMyL1iFpssnBeS\"
      hash: \"rdJLgqYgkEp8jg8Qks1qiq\"
      generation: 1
    rule:
      sequence:
        window: 30s
        correlations:
          - hostname
        order:
          - term1
          - term2
          - term3

terms:
  term1:
    sequence:
      window: 10s
      event:
        source: rabbitmq
        origin: true
      order:
        - value: Discarding message
          count: 10
        - Mnesia overloaded
      negate:
        - SIGTERM
  term2:
    set:
      event:
        source: k8s
      window: 10d
      match:
      - field: \"reason\"
        value: \"Killing\"
  term3:
    set:
      event:
        source: k8s
      negate:
        - field: \"reason\"
          value: \"Killing\"
          window: 10s
          slide: 1s
";

pub const FAIL_MISSING_CRE_ID: &str = " # Line 1 starts here
rules:
  - cre:
      severity: 1
    metadata:
      id: \"J7uRQTGpGMyL1iFpssnBeS\"
      hash: \"rdJLgqYgkEp8jg8Qks1qiq\"
      generation: 1
    rule:
      set:
        window: 10s
        event:
          source: kafka
        match:
          - regex: \"io.vertx.core.VertxException: Thread blocked\"
";

pub const FAIL_MISSING_RULE_ID: &str = " # Line 1 starts here
rules:
  - cre:
      id: cre-missing-rule-id
      severity: 1
    metadata:
      hash: \"rdJLgqYgkEp8jg8Qks1qiq\"
      generation: 1
    rule:
      set:
        window: 10s
        event:
          source: kafka
        match:
          - regex: \"io.vertx.core.VertxException: Thread blocked\"
";

pub const FAIL_MISSING_RULE_HASH: &str = " # Line 1 starts here
rules:
  - cre:
      id: cre-missing-rule-hash
      severity: 1
    metadata:
      id: \"J7uRQTGpGMyL1iFpssnBeS\"
      generation: 1
    rule:
      set:
        window: 10s
        event:
          source: kafka
        match:
          - regex: \"io.vertx.core.VertxException: Thread blocked\"
";

pub const FAIL_BAD_CRE_ID: &str = " # Line 1 starts here
rules:
  - cre:
      id: \"asdf  asdf  asdf\"
      severity: 1
    metadata:
      id: \"J7uRQTGpGMyL1iFpssnBeS\"
      hash: \"rdJLgqYgkEp8jg8Qks1qiq\"
      generation: 1
    rule:
      set:
        window: 10s
        event:
          source: kafka
        match:
          - regex: \"io.vertx.core.VertxException: Thread blocked\"
";

pub const FAIL_BAD_RULE_ID: &str = " # Line 1 starts here
rules:
  - cre:
      id: cre-bad-rule-id
      severity: 1
    metadata:
      id: \"zzzzzz zzzzzz zzzzzz zzzzzz\"
      hash: \"rdJLgqYgkEp8jg8Qks1qiq\"
      generation: 1
    rule:
      set:
        window: 10s
        event:
          source: kafka
        match:
          - regex: \"io.vertx.core.VertxException: Thread blocked\"
";

pub const FAIL_BAD_RULE_HASH: &str = " # Line 1 starts here
rules:
  - cre:
      id: cre-bad-rule-hash
      severity: 1
    metadata:
      id: \"J7uRQTGpGMyL1iFpssnBeS\"
      hash: \"asdfas asdf     a\"
      generation: 1
    rule:
      set:
        window: 10s
        event:
          source: kafka
        match:
          - regex: \"io.vertx.core.VertxException: Thread blocked\"
";
