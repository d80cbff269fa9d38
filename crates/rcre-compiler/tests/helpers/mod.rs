//! Shared rule documents for the AST and compile test suites.
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

pub const MATCH_SINGLE_SET: &str = "
rules:
  - cre:
      id: cre-kafka-single
    metadata:
      id: \"J7uRQTGpGMyL1iFpssnBeS\"
      hash: \"rdJLgqYgkEp8jg8Qks1qiq\"
    rule:
      set:
        event:
          source: kafka
        match:
          - \"Broker may not be available\"
";

pub const INVERSE_SET: &str = "
rules:
  - cre:
      id: cre-kafka-inverse-set
    metadata:
      id: \"J7uRQTGpGMyL1iFpssnBeS\"
      hash: \"rdJLgqYgkEp8jg8Qks1qiq\"
    rule:
      set:
        window: 5s
        event:
          source: kafka
        match:
          - \"Broker may not be available\"
          - \"Connection refused\"
        negate:
          - \"Rebalance started\"
";

pub const ORDERING_RULES: &str = "
rules:
  - cre:
      id: cre-ordering-seq
    metadata:
      id: \"J7uRQTGpGMyL1iFpssnBeS\"
      hash: \"rdJLgqYgkEp8jg8Qks1qiq\"
    rule:
      sequence:
        window: 30s
        order:
          - k8s_killing
          - k8s_shutdown
  - cre:
      id: cre-ordering-set
    metadata:
      id: \"9XyzABCDEFGHJKmnpqrstu\"
      hash: \"3WuvwxyzABCDEFGHJKmnpq\"
    rule:
      set:
        window: 10s
        match:
          - k8s_killing
          - k8s_shutdown
terms:
  k8s_killing:
    set:
      event:
        source: k8s
        origin: true
      match:
        - field: \"reason\"
          value: \"Killing\"
  k8s_shutdown:
    set:
      event:
        source: k8s
      match:
        - field: \"reason\"
          value: \"NodeShutdown\"
";

/* Failure documents. Position assertions count lines from the leading
comment, which is line 1. */

pub const FAIL_SET_ONLY_NEGATE: &str = " # Line 1 starts here
rules:
  - cre:
      id: cre-set-only-negate
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
      negate:
        - field: \"reason\"
          value: \"NodeShutdown\"
  term3:
    sequence:
      window: 5s
      order:
        - error message
        - shutdown
";

pub const FAIL_NEGATED_TERM_ONLY_NEGATE: &str = " # Line 1 starts here
rules:
  - cre:
      id: cre-negated-term-only-negate
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

pub const FAIL_SINGLE_POSITIVE_SEQ: &str = " # Line 1 starts here
rules:
  - cre:
      id: cre-single-positive-seq
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
    sequence:
      event:
        source: k8s
      window: 1s
      order:
      - field: \"reason\"
        value: \"Killing\"
  term3:
    set:
      event:
        source: k8s
      match:
        - field: \"reason\"
          value: \"Killing\"
";

pub const FAIL_NO_EVENT_SOURCE: &str = " # Line 1 starts here
rules:
  - cre:
      id: cre-no-event-source
    metadata:
      id: \"J7uRQTGpGMyL1iFpssnBeS\"
      hash: \"rdJLgqYgkEp8jg8Qks1qiq\"
      generation: 1
    rule:
      sequence:
        window: 0s
        correlations:
          - hostname
        order:
          - term1
";

pub const FAIL_NO_ORIGIN: &str = " # Line 1 starts here
rules:
  - cre:
      id: cre-no-origin
    metadata:
      id: \"J7uRQTGpGMyL1iFpssnBeS\"
      hash: \"rdJLgqYgkEp8jg8Qks1qiq\"
      generation: 1
    rule:
      set:
        event:
          source: kafka
        correlations:
          - hostname
        match:
          - set:
              event:
                source: kafka
              match:
                - field: \"reason\"
                  value: \"Killing\"
";

pub const FAIL_EMPTY_EVENT_SOURCE: &str = " # Line 1 starts here
rules:
  - cre:
      id: cre-empty-event-source
    metadata:
      id: \"J7uRQTGpGMyL1iFpssnBeS\"
      hash: \"rdJLgqYgkEp8jg8Qks1qiq\"
      generation: 1
    rule:
      set:
        event:
          source: kafka
        correlations:
          - hostname
        match:
          - set:
              event:
                source:
              match:
                - field: \"reason\"
                  value: \"Killing\"
";

pub const FAIL_ANCHOR_RANGE: &str = " # Line 1 starts here
rules:
  - cre:
      id: cre-anchor-range
    metadata:
      id: \"J7uRQTGpGMyL1iFpssnBeS\"
      hash: \"rdJLgqYgkEp8jg8Qks1qiq\"
      generation: 1
    rule:
      set:
        event:
          source: kafka
        correlations:
          - neighbor
        match:
          - value: \"Killing\"
        negate:
          - value: \"SIGTERM\"
            window: 10s
            anchor: 10
";

pub const FAIL_UNKNOWN_K8S_FIELD: &str = " # Line 1 starts here
rules:
  - cre:
      id: cre-unknown-k8s-field
    metadata:
      id: \"J7uRQTGpGMyL1iFpssnBeS\"
      hash: \"rdJLgqYgkEp8jg8Qks1qiq\"
      generation: 1
    rule:
      set:
        event:
          source: k8s
        match:
          - field: \"not-a-real-k8s-field\"
            value: \"Killing\"
";
